//! Per-viewer view of a match: the viewer's own hand, nobody else's.

use serde::{Deserialize, Serialize};

use crate::domain::cards_logic::has_legal_move;
use crate::domain::state::{MatchState, ParticipantId};
use crate::domain::Card;

/// Private half of a snapshot, sent only to `participant_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerState {
    pub participant_id: ParticipantId,
    pub hand: Vec<Card>,
    pub draw_count: usize,
    /// Some hand card fits on a center top right now.
    pub can_play: bool,
    pub voted_flip: bool,
}

/// Build the private view for `viewer`, or `None` if they are not dealt in.
pub fn viewer_state(state: &MatchState, viewer: ParticipantId) -> Option<ViewerState> {
    let player = state.player(viewer)?;
    Some(ViewerState {
        participant_id: viewer,
        hand: player.hand.clone(),
        draw_count: player.draw_pile.len(),
        can_play: has_legal_move(&player.hand, &state.tops()),
        voted_flip: state.flip_votes.has_voted(viewer),
    })
}
