//! Public snapshot API for observing match state without exposing hands.

use serde::{Deserialize, Serialize};

use crate::domain::flip::FlipVote;
use crate::domain::state::{MatchState, ParticipantId, Phase};
use crate::domain::{Card, Piles};

/// What everyone may know about one participant's cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub participant_id: ParticipantId,
    pub name: String,
    pub hand_count: usize,
    pub draw_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterPublic {
    pub top: Option<Card>,
    pub size: usize,
}

/// Shared table view, identical for every viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub phase: Phase,
    pub players: Vec<PlayerPublic>,
    pub center: Piles<CenterPublic>,
    pub side_counts: Piles<usize>,
    pub flip_votes: Vec<FlipVote>,
    pub winner_id: Option<ParticipantId>,
}

pub fn snapshot(state: &MatchState) -> MatchSnapshot {
    MatchSnapshot {
        phase: state.phase,
        players: state
            .players
            .iter()
            .map(|p| PlayerPublic {
                participant_id: p.participant_id,
                name: p.name.clone(),
                hand_count: p.hand.len(),
                draw_count: p.draw_pile.len(),
            })
            .collect(),
        center: state.center_piles.map(|pile| CenterPublic {
            top: pile.last().copied(),
            size: pile.len(),
        }),
        side_counts: state.side_piles.map(Vec::len),
        flip_votes: state.flip_votes.entries(),
        winner_id: state.winner.as_ref().map(|w| w.winner),
    }
}
