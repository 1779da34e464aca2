use tracing::debug;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// Display colours handed out to seats in order, cycling by seat index.
pub const PALETTE: [PlayerColor; 8] = [
    PlayerColor::rgb(0x3B, 0x82, 0xF6),
    PlayerColor::rgb(0xEF, 0x44, 0x44),
    PlayerColor::rgb(0x10, 0xB9, 0x81),
    PlayerColor::rgb(0xF5, 0x9E, 0x0B),
    PlayerColor::rgb(0x8B, 0x5C, 0xF6),
    PlayerColor::rgb(0xEC, 0x48, 0x99),
    PlayerColor::rgb(0x63, 0x66, 0xF1),
    PlayerColor::rgb(0x14, 0xB8, 0xA6),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PlayerColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn for_seat(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }
}

pub type PlayerId = u32;

/// A seat at the table.
///
/// `accumulated_secs` and `turn_count` are only written by the session when a
/// turn is committed or the game is reset, so they are not public fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    accumulated_secs: u64,
    turn_count: u32,
}

impl Player {
    fn new(id: PlayerId, name: String, color: PlayerColor) -> Self {
        Self {
            id,
            name,
            color,
            accumulated_secs: 0,
            turn_count: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn accumulated_secs(&self) -> u64 {
        self.accumulated_secs
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Mean length of a completed turn in whole seconds.
    pub fn average_turn_secs(&self) -> Option<u64> {
        match self.turn_count {
            0 => None,
            turns => Some(self.accumulated_secs / u64::from(turns)),
        }
    }

    pub(crate) fn commit_turn(&mut self, elapsed_secs: u64) {
        self.accumulated_secs += elapsed_secs;
        self.turn_count += 1;
    }

    pub(crate) fn clear_times(&mut self) {
        self.accumulated_secs = 0;
        self.turn_count = 0;
    }
}

pub fn default_name(seat: usize) -> String {
    format!("Player {}", seat + 1)
}

/// Ordered list of players, always holding between [`MIN_PLAYERS`] and
/// [`MAX_PLAYERS`] entries.
#[derive(Clone, Debug)]
pub struct Roster {
    players: Vec<Player>,
    next_id: PlayerId,
}

impl Roster {
    /// Builds a roster of `count` players (clamped to the legal range).
    /// Seats without a supplied name get the default `Player N`.
    pub fn with_names(count: usize, names: &[String]) -> Self {
        let count = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        let mut roster = Self {
            players: Vec::with_capacity(MAX_PLAYERS),
            next_id: 1,
        };
        for seat in 0..count {
            let name = names
                .get(seat)
                .filter(|n| !n.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| default_name(seat));
            roster.push(name);
        }
        roster
    }

    fn push(&mut self, name: String) {
        let seat = self.players.len();
        let player = Player::new(self.next_id, name, PlayerColor::for_seat(seat));
        self.next_id += 1;
        self.players.push(player);
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    pub fn can_add(&self) -> bool {
        self.players.len() < MAX_PLAYERS
    }

    pub fn can_remove(&self) -> bool {
        self.players.len() > MIN_PLAYERS
    }

    /// Appends a fresh player. Returns false once the table is full.
    pub fn add(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        let seat = self.players.len();
        self.push(default_name(seat));
        debug!(seat, size = self.players.len(), "player added");
        true
    }

    /// Drops the last seat. Returns the removed player, or None at the floor.
    pub fn remove_last(&mut self) -> Option<Player> {
        if !self.can_remove() {
            return None;
        }
        let removed = self.players.pop();
        debug!(size = self.players.len(), "player removed");
        removed
    }

    pub fn rename(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.name = name.into();
                debug!(id, name = %player.name, "player renamed");
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_times(&mut self) {
        for player in &mut self.players {
            player.clear_times();
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::with_names(MIN_PLAYERS, &[])
    }
}
