//! Core card-related types: Card, CardId, Rank, Suit, PileSide

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    const fn index(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }
}

/// Card rank, ace low: 1 (ace) through 13 (king).
///
/// Serialized as the bare number so clients can compare ranks directly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const KING: Rank = Rank(13);

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (1..=13).contains(&value) {
            Ok(Rank(value))
        } else {
            Err(DomainError::validation(
                ValidationKind::InvalidRank,
                format!("rank must be 1..=13, got {value}"),
            ))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// All thirteen ranks, ace first.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13).map(Rank)
    }
}

impl TryFrom<u8> for Rank {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

/// Opaque card token, unique per (rank, suit) within the 52-card deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        let id = CardId(suit.index() * 13 + (rank.value() - 1));
        Self { id, rank, suit }
    }
}

// Ordering is by id (suit-major, then rank) and only exists for stable
// sorting in tests and snapshots.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Which of the two center/side pile pairs an action targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PileSide {
    Left,
    Right,
}

impl PileSide {
    pub const BOTH: [PileSide; 2] = [PileSide::Left, PileSide::Right];
}

/// A left/right pair of anything pile-shaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles<T> {
    pub left: T,
    pub right: T,
}

impl<T> Piles<T> {
    pub fn get(&self, side: PileSide) -> &T {
        match side {
            PileSide::Left => &self.left,
            PileSide::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: PileSide) -> &mut T {
        match side {
            PileSide::Left => &mut self.left,
            PileSide::Right => &mut self.right,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Piles<U> {
        Piles {
            left: f(&self.left),
            right: f(&self.right),
        }
    }
}
