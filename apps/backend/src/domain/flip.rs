//! Unanimous flip voting and its resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::dealing::reshuffle_center_piles;
use crate::domain::seed_derivation::derive_reshuffle_seed;
use crate::domain::state::{MatchState, ParticipantId};
use crate::domain::PileSide;

/// One participant's standing flip vote, as shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipVote {
    pub participant_id: ParticipantId,
    pub voted: bool,
}

/// Per-participant flip votes. A vote survives until a flip resolves or
/// any card is played.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipVotes {
    votes: BTreeMap<ParticipantId, bool>,
}

impl FlipVotes {
    pub fn for_participants(ids: impl IntoIterator<Item = ParticipantId>) -> Self {
        Self {
            votes: ids.into_iter().map(|id| (id, false)).collect(),
        }
    }

    pub fn record(&mut self, id: ParticipantId) {
        self.votes.insert(id, true);
    }

    pub fn clear(&mut self) {
        self.votes.values_mut().for_each(|v| *v = false);
    }

    pub fn has_voted(&self, id: ParticipantId) -> bool {
        self.votes.get(&id).copied().unwrap_or(false)
    }

    /// Every currently registered participant has voted.
    pub fn is_unanimous(&self, registered: &[ParticipantId]) -> bool {
        !registered.is_empty() && registered.iter().all(|id| self.has_voted(*id))
    }

    pub fn entries(&self) -> Vec<FlipVote> {
        self.votes
            .iter()
            .map(|(id, voted)| FlipVote {
                participant_id: *id,
                voted: *voted,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Not everyone has voted yet.
    Pending,
    /// One side-pile card moved onto each center pile.
    Flipped,
    /// Side piles could not feed both centers; center piles were reshuffled.
    Reshuffled,
}

/// Apply a flip if the vote is unanimous among the match participants.
pub fn resolve_flip(state: &mut MatchState) -> FlipOutcome {
    let ids = state.participant_ids();
    if !state.flip_votes.is_unanimous(&ids) {
        return FlipOutcome::Pending;
    }

    let outcome = if state.side_piles.left.is_empty() || state.side_piles.right.is_empty() {
        state.reshuffles += 1;
        let seed = derive_reshuffle_seed(state.deal_seed, state.reshuffles);
        reshuffle_center_piles(&mut state.center_piles, &mut state.side_piles, seed);
        FlipOutcome::Reshuffled
    } else {
        for side in PileSide::BOTH {
            if let Some(card) = state.side_piles.get_mut(side).pop() {
                state.center_piles.get_mut(side).push(card);
            }
        }
        FlipOutcome::Flipped
    };

    state.flip_votes.clear();
    outcome
}
