//! Ordered player list for a single position.
//!
//! Rosters are tiny (a handful of players per position), so lookups are
//! linear scans over a `Vec`.

use crate::models::Player;

/// Depth-ordered players at one position. Index 0 is the starter.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    players: Vec<Player>,
    /// Creation sequence number, used to report positions in insertion order.
    created: u64,
}

impl Roster {
    pub fn new(created: u64) -> Self {
        Self {
            players: Vec::new(),
            created,
        }
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    fn position_of(&self, player: &Player) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    /// Place a player on the chart.
    ///
    /// Without a rank, or with a rank past the end, the player is appended
    /// unless already listed (an existing entry is left where it is).
    /// With an in-bounds rank the player ends up at that index, moving it if
    /// it was listed elsewhere and shifting everyone at or below the rank
    /// down by one.
    pub fn insert(&mut self, player: Player, rank: Option<usize>) {
        let mut rank = match rank {
            Some(rank) if rank < self.players.len() => rank,
            _ => {
                if self.position_of(&player).is_none() {
                    self.players.push(player);
                }
                return;
            }
        };

        if let Some(existing) = self.position_of(&player) {
            if existing == rank {
                return;
            }
            self.players.remove(existing);
            if existing < rank {
                rank -= 1;
            }
        }

        self.players.insert(rank, player);
    }

    /// Remove a player, returning it if it was listed.
    pub fn remove(&mut self, player: &Player) -> Option<Player> {
        self.position_of(player).map(|idx| self.players.remove(idx))
    }

    /// Everyone ranked strictly below the given player.
    /// Empty when the player is last or not listed at all.
    pub fn backups(&self, player: &Player) -> Vec<Player> {
        match self.position_of(player) {
            Some(idx) => self.players[idx + 1..].to_vec(),
            None => Vec::new(),
        }
    }
}
