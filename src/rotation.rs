use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the active-player marker moves round the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(ValueEnum, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    #[default]
    Clockwise,
    #[strum(to_string = "Anti-clockwise")]
    Anticlockwise,
    Manual,
}

impl RotationMode {
    /// Seat that follows `index` at a table of `len`, or None when the mode
    /// has no automatic successor.
    pub fn next_index(&self, index: usize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match self {
            RotationMode::Clockwise => Some((index + 1) % len),
            RotationMode::Anticlockwise => Some((index + len - 1) % len),
            RotationMode::Manual => None,
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            RotationMode::Clockwise => RotationMode::Anticlockwise,
            RotationMode::Anticlockwise => RotationMode::Manual,
            RotationMode::Manual => RotationMode::Clockwise,
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, RotationMode::Manual)
    }

    /// Glyph drawn in the middle of the board.
    pub fn arrow(&self) -> Option<&'static str> {
        match self {
            RotationMode::Clockwise => Some("↻"),
            RotationMode::Anticlockwise => Some("↺"),
            RotationMode::Manual => None,
        }
    }
}
