use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::app_dirs::AppDirs;
use crate::error::{Result, TurnclockError};
use crate::roster::{MAX_PLAYERS, MIN_PLAYERS};
use crate::rotation::RotationMode;
use crate::session::{SessionConfig, SessionState};

/// Table setup remembered between runs. Game times are never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub players: usize,
    pub names: Vec<String>,
    pub rotation_mode: RotationMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: MIN_PLAYERS,
            names: Vec::new(),
            rotation_mode: RotationMode::Clockwise,
        }
    }
}

impl Config {
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            number_of_players: self.players.clamp(MIN_PLAYERS, MAX_PLAYERS),
            names: self.names.clone(),
            rotation_mode: self.rotation_mode,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            Ok(())
        } else {
            Err(TurnclockError::InvalidPlayerCount {
                got: self.players,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            })
        }
    }
}

impl From<&SessionState> for Config {
    fn from(session: &SessionState) -> Self {
        Self {
            players: session.players().len(),
            names: session.players().iter().map(|p| p.name.clone()).collect(),
            rotation_mode: session.rotation_mode(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no config file, using defaults");
                return Config::default();
            }
        };
        let mut cfg = match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "config unreadable, using defaults");
                return Config::default();
            }
        };
        if let Err(err) = cfg.validate() {
            warn!(path = %self.path.display(), %err, "config out of range, clamping");
            cfg.players = cfg.players.clamp(MIN_PLAYERS, MAX_PLAYERS);
        }
        cfg
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| TurnclockError::io(parent, e))?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data).map_err(|e| TurnclockError::io(&self.path, e))?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
