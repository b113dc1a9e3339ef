//! Domain layer: pure match logic types and helpers.

pub mod cards_logic;
pub mod cards_types;
pub mod dealing;
pub mod flip;
pub mod play;
pub mod player_view;
pub mod rules;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_play;
#[cfg(test)]
mod tests_props_adjacency;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use cards_logic::{has_legal_move, is_adjacent};
pub use cards_types::{Card, CardId, PileSide, Piles, Rank, Suit};
pub use flip::{FlipOutcome, FlipVote, FlipVotes};
pub use play::{draw_card, play_card, start_match, vote_flip, PlayOutcome};
pub use player_view::{viewer_state, ViewerState};
pub use snapshot::{snapshot, MatchSnapshot};
pub use state::{MatchState, ParticipantId, Phase, WinRecord};
