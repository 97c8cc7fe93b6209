//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Wolf Goat Pig rounds run 4, 5, or 6
//! players; the storage supports up to 255 so the cap lives in one place.
//!
//! ## PlayerMap
//!
//! Per-player data backed by `Vec` for O(1) access, indexed by `PlayerId`.
//! Used for standings, stroke credits, gross scores, and float bookkeeping.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier, 0-based: the first player in tee order is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a round with `player_count` players.
    ///
    /// ```
    /// use wolf_goat_pig::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Reference data for one player in the round.
///
/// Immutable once the round starts; supplied by the caller at setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Course handicap, decimal (e.g. 10.4).
    pub handicap: f64,
    /// Tee order for the opening rotation. Falls back to id order when absent.
    pub tee_order: Option<u8>,
}

impl Player {
    /// Create a player with no explicit tee order.
    pub fn new(id: PlayerId, name: impl Into<String>, handicap: f64) -> Self {
        Self {
            id,
            name: name.into(),
            handicap,
            tee_order: None,
        }
    }

    /// Set the tee order.
    #[must_use]
    pub fn with_tee_order(mut self, order: u8) -> Self {
        self.tee_order = Some(order);
        self
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
///
/// ## Example
///
/// ```
/// use wolf_goat_pig::core::{PlayerId, PlayerMap};
///
/// let mut quarters: PlayerMap<f64> = PlayerMap::with_value(4, 0.0);
/// quarters[PlayerId::new(1)] = 2.0;
/// assert_eq!(quarters[PlayerId::new(1)], 2.0);
/// assert_eq!(quarters[PlayerId::new(0)], 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// The round's roster: one [`Player`] per seat, in id order.
pub type Roster = PlayerMap<Player>;

impl Roster {
    /// Build a roster from players listed in id order.
    ///
    /// Panics if ids are not dense 0..n in order; the roster is the
    /// authority on seat numbering.
    #[must_use]
    pub fn from_players(players: Vec<Player>) -> Self {
        for (i, p) in players.iter().enumerate() {
            assert_eq!(p.id.index(), i, "roster ids must be dense and in order");
        }
        Self { data: players }
    }

    /// Lowest handicap in the field (the "low man").
    #[must_use]
    pub fn min_handicap(&self) -> f64 {
        self.data
            .iter()
            .map(|p| p.handicap)
            .fold(f64::INFINITY, f64::min)
    }

    /// Tee order for a player, falling back to seat index.
    #[must_use]
    pub fn tee_order(&self, player: PlayerId) -> u8 {
        self[player].tee_order.unwrap_or(player.0)
    }
}
