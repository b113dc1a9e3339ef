use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::flip::FlipVotes;
use crate::domain::rules::HAND_CAPACITY;
use crate::domain::{Card, CardId, PileSide, Piles};

/// Public identity of a registered participant. Safe to show to the opponent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Match lifecycle phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fewer than two ready participants.
    Waiting,
    /// Both ready; the countdown timer is running.
    CountingDown,
    /// Cards are dealt and plays are accepted.
    Playing,
    /// A winner was found (or the match aborted, briefly, before reset).
    Finished,
}

/// Cards owned by one participant during a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerGameState {
    pub participant_id: ParticipantId,
    pub name: String,
    /// Unordered, at most `HAND_CAPACITY` cards.
    pub hand: Vec<Card>,
    /// Stack; the top card is the last element.
    pub draw_pile: Vec<Card>,
}

impl PlayerGameState {
    pub fn cards_left(&self) -> usize {
        self.hand.len() + self.draw_pile.len()
    }

    /// Terminal win condition: both hand and draw pile exhausted.
    pub fn has_won(&self) -> bool {
        self.hand.is_empty() && self.draw_pile.is_empty()
    }

    pub fn can_refill(&self) -> bool {
        !self.draw_pile.is_empty() && self.hand.len() < HAND_CAPACITY
    }

    /// Move one card from the draw pile top into the hand, if there is room.
    pub fn refill_one(&mut self) -> bool {
        if !self.can_refill() {
            return false;
        }
        match self.draw_pile.pop() {
            Some(card) => {
                self.hand.push(card);
                true
            }
            None => false,
        }
    }

    pub fn hand_card(&self, card_id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == card_id)
    }

    pub fn take_from_hand(&mut self, card_id: CardId) -> Option<Card> {
        let idx = self.hand.iter().position(|c| c.id == card_id)?;
        Some(self.hand.swap_remove(idx))
    }
}

/// Outcome of a decided match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinRecord {
    pub winner: ParticipantId,
    pub winner_name: String,
    pub loser: ParticipantId,
    /// Loser's `hand + draw_pile` at the moment the winner emptied theirs.
    pub opponent_cards_left: usize,
}

/// The authoritative state of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub phase: Phase,
    /// In registry order.
    pub players: Vec<PlayerGameState>,
    /// Stacks; only the last element (the top) is relevant to validation.
    pub center_piles: Piles<Vec<Card>>,
    pub side_piles: Piles<Vec<Card>>,
    pub flip_votes: FlipVotes,
    pub winner: Option<WinRecord>,
    /// Seed the deal was shuffled with; reshuffle seeds derive from it.
    pub deal_seed: u64,
    pub reshuffles: u32,
}

impl MatchState {
    /// Empty pre-deal state.
    pub fn waiting() -> Self {
        Self {
            phase: Phase::Waiting,
            players: Vec::new(),
            center_piles: Piles::default(),
            side_piles: Piles::default(),
            flip_votes: FlipVotes::default(),
            winner: None,
            deal_seed: 0,
            reshuffles: 0,
        }
    }

    pub fn top(&self, side: PileSide) -> Option<Card> {
        self.center_piles.get(side).last().copied()
    }

    pub fn tops(&self) -> Piles<Option<Card>> {
        self.center_piles.map(|pile| pile.last().copied())
    }

    pub fn player(&self, id: ParticipantId) -> Option<&PlayerGameState> {
        self.players.iter().find(|p| p.participant_id == id)
    }

    pub fn player_mut(&mut self, id: ParticipantId) -> Option<&mut PlayerGameState> {
        self.players.iter_mut().find(|p| p.participant_id == id)
    }

    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        self.players.iter().map(|p| p.participant_id).collect()
    }

    /// Every card currently on the table, in no particular order.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(52);
        for p in &self.players {
            cards.extend_from_slice(&p.hand);
            cards.extend_from_slice(&p.draw_pile);
        }
        for side in PileSide::BOTH {
            cards.extend_from_slice(self.center_piles.get(side));
            cards.extend_from_slice(self.side_piles.get(side));
        }
        cards
    }
}
