use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::roster::{PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use crate::rotation::RotationMode;
use crate::session::{SessionConfig, SessionState};

pub const MAX_NAME_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Renaming { id: PlayerId, buffer: String },
}

/// What the event loop should do after a key has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
    SaveSetup,
}

/// Controller for the single timer screen: the game session plus the bits of
/// UI state (focus cursor, rename buffer, status line) that go with it.
#[derive(Debug)]
pub struct App {
    pub session: SessionState,
    pub focus: usize,
    pub input_mode: InputMode,
    pub started_at: Option<DateTime<Local>>,
    pub status: Option<String>,
}

impl App {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            session: SessionState::new(config),
            focus: 0,
            input_mode: InputMode::Normal,
            started_at: None,
            status: None,
        }
    }

    pub fn on_tick(&mut self) {
        self.session.tick();
    }

    pub fn is_renaming(&self) -> bool {
        matches!(self.input_mode, InputMode::Renaming { .. })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        if self.is_renaming() {
            self.handle_rename_key(key);
            return AppAction::Continue;
        }

        self.status = None;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char(' ') => self.toggle_clock(),
            KeyCode::Char('n') => self.advance_turn(),
            KeyCode::Enter => {
                if self.session.rotation_mode().is_manual() {
                    self.select_player(self.focus);
                } else {
                    self.advance_turn();
                }
            }
            KeyCode::Char(c @ '1'..='8') => {
                let index = c as usize - '1' as usize;
                self.select_player(index);
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_focus(1),
            KeyCode::Char('a') | KeyCode::Char('+') => {
                if !self.session.add_player() {
                    self.status = Some(format!("The table is full ({MAX_PLAYERS} players)"));
                }
            }
            KeyCode::Char('d') | KeyCode::Char('-') => {
                if self.session.remove_player() {
                    self.focus = self.focus.min(self.session.players().len() - 1);
                } else {
                    self.status = Some(format!("A game needs at least {MIN_PLAYERS} players"));
                }
            }
            KeyCode::Char('e') => self.begin_rename(),
            KeyCode::Char('m') => self.session.cycle_rotation_mode(),
            KeyCode::Char('c') => self.session.set_rotation_mode(RotationMode::Clockwise),
            KeyCode::Char('w') => self.session.set_rotation_mode(RotationMode::Anticlockwise),
            KeyCode::Char('u') => self.session.set_rotation_mode(RotationMode::Manual),
            KeyCode::Char('r') => {
                self.session.reset();
                self.started_at = None;
            }
            KeyCode::Char('s') => return AppAction::SaveSetup,
            _ => {}
        }
        AppAction::Continue
    }

    fn toggle_clock(&mut self) {
        self.session.toggle_running();
        if self.session.is_running() && self.started_at.is_none() {
            self.started_at = Some(Local::now());
        }
    }

    fn advance_turn(&mut self) {
        if self.session.advance_turn() {
            self.focus = self.session.active_index();
        } else {
            self.status = Some(format!(
                "Manual mode: pick the next player with 1-{} or Enter",
                self.session.players().len()
            ));
        }
    }

    fn select_player(&mut self, index: usize) {
        if !self.session.rotation_mode().is_manual() {
            self.status = Some("Switch to (u) manual mode to pick players directly".into());
            return;
        }
        if self.session.select_player(index) {
            self.focus = index;
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let len = self.session.players().len() as isize;
        self.focus = (self.focus as isize + delta).rem_euclid(len) as usize;
    }

    fn begin_rename(&mut self) {
        if let Some(player) = self.session.players().get(self.focus) {
            debug!(id = player.id(), "rename started");
            self.input_mode = InputMode::Renaming {
                id: player.id(),
                buffer: player.name.clone(),
            };
        }
    }

    fn handle_rename_key(&mut self, key: KeyEvent) {
        let InputMode::Renaming { id, buffer } = &mut self.input_mode else {
            return;
        };
        match key.code {
            KeyCode::Enter => {
                let (id, name) = (*id, std::mem::take(buffer));
                self.session.rename_player(id, name);
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                if buffer.chars().count() < MAX_NAME_LEN {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
