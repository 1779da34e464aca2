use tracing::{debug, info};

use crate::roster::{Player, PlayerId, Roster, MIN_PLAYERS};
use crate::rotation::RotationMode;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub number_of_players: usize,
    pub names: Vec<String>,
    pub rotation_mode: RotationMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            number_of_players: MIN_PLAYERS,
            names: Vec::new(),
            rotation_mode: RotationMode::default(),
        }
    }
}

/// Everything the timer knows about the game in progress.
///
/// All mutation goes through the methods below; actions that are not
/// currently allowed (a full table, advancing in manual mode, ...) leave the
/// state untouched and return `false`.
#[derive(Debug, Clone)]
pub struct SessionState {
    roster: Roster,
    active_index: usize,
    is_running: bool,
    current_turn_secs: u64,
    total_secs: u64,
    rotation_mode: RotationMode,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            roster: Roster::with_names(config.number_of_players, &config.names),
            active_index: 0,
            is_running: false,
            current_turn_secs: 0,
            total_secs: 0,
            rotation_mode: config.rotation_mode,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_player(&self) -> &Player {
        &self.roster.players()[self.active_index]
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn current_turn_secs(&self) -> u64 {
        self.current_turn_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    /// Time shown on a seat: the committed total plus the running turn for
    /// whoever currently holds it.
    pub fn live_secs(&self, index: usize) -> u64 {
        let committed = self
            .roster
            .get(index)
            .map(Player::accumulated_secs)
            .unwrap_or(0);
        if index == self.active_index {
            committed + self.current_turn_secs
        } else {
            committed
        }
    }

    pub fn start(&mut self) {
        if !self.is_running {
            self.is_running = true;
            info!(player = %self.active_player().name, "clock started");
        }
    }

    pub fn pause(&mut self) {
        if self.is_running {
            self.is_running = false;
            info!(
                turn_secs = self.current_turn_secs,
                total_secs = self.total_secs,
                "clock paused"
            );
        }
    }

    pub fn toggle_running(&mut self) {
        if self.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// One second of wall-clock time. Ignored while paused.
    pub fn tick(&mut self) {
        if self.is_running {
            self.current_turn_secs += 1;
            self.total_secs += 1;
        }
    }

    fn commit_turn(&mut self) {
        let elapsed = self.current_turn_secs;
        if let Some(player) = self.roster.get_mut(self.active_index) {
            player.commit_turn(elapsed);
            debug!(
                player = %player.name,
                elapsed,
                turns = player.turn_count(),
                "turn committed"
            );
        }
        self.current_turn_secs = 0;
    }

    /// Hands the turn to the next seat in the current direction.
    /// Disabled in manual mode.
    pub fn advance_turn(&mut self) -> bool {
        let Some(next) = self
            .rotation_mode
            .next_index(self.active_index, self.roster.len())
        else {
            return false;
        };
        self.commit_turn();
        self.active_index = next;
        true
    }

    /// Hands the turn straight to `index`. Only available in manual mode;
    /// picking the seat that already holds the turn does nothing.
    pub fn select_player(&mut self, index: usize) -> bool {
        if !self.rotation_mode.is_manual()
            || index == self.active_index
            || index >= self.roster.len()
        {
            return false;
        }
        self.commit_turn();
        self.active_index = index;
        true
    }

    pub fn set_rotation_mode(&mut self, mode: RotationMode) {
        if self.rotation_mode != mode {
            debug!(from = %self.rotation_mode, to = %mode, "rotation mode changed");
            self.rotation_mode = mode;
        }
    }

    pub fn cycle_rotation_mode(&mut self) {
        self.set_rotation_mode(self.rotation_mode.cycle());
    }

    pub fn can_add_player(&self) -> bool {
        self.roster.can_add()
    }

    pub fn can_remove_player(&self) -> bool {
        self.roster.can_remove()
    }

    pub fn add_player(&mut self) -> bool {
        self.roster.add()
    }

    /// Removes the last seat. If that leaves the active index dangling the
    /// turn goes back to seat 0 and the unfinished turn leaves with the
    /// removed player.
    pub fn remove_player(&mut self) -> bool {
        if self.roster.remove_last().is_none() {
            return false;
        }
        if self.active_index >= self.roster.len() {
            self.active_index = 0;
            self.current_turn_secs = 0;
        }
        true
    }

    pub fn rename_player(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        self.roster.rename(id, name)
    }

    /// Stops the clock and zeroes every counter. Seats, names and colours stay.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.active_index = 0;
        self.current_turn_secs = 0;
        self.total_secs = 0;
        self.roster.clear_times();
        info!(players = self.roster.len(), "session reset");
    }
}
