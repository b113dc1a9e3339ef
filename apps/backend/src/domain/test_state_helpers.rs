//! Test-only match state builders for domain unit tests.

use crate::domain::flip::FlipVotes;
use crate::domain::play::start_match;
use crate::domain::state::{MatchState, ParticipantId, Phase, PlayerGameState};
use crate::domain::{Card, Piles, Rank, Suit};

pub fn card(rank: u8, suit: Suit) -> Card {
    Card::new(Rank::new(rank).unwrap(), suit)
}

pub fn two_participants() -> Vec<(ParticipantId, String)> {
    vec![
        (ParticipantId::new_random(), "ana".to_string()),
        (ParticipantId::new_random(), "ben".to_string()),
    ]
}

/// A freshly dealt match from `seed`.
pub fn dealt(seed: u64) -> MatchState {
    start_match(&two_participants(), seed)
}

/// Hand-built `Playing` state for targeted rule tests. Does not hold a full
/// deck, so it is not suitable for conservation checks.
pub fn table(
    hands: [Vec<Card>; 2],
    draws: [Vec<Card>; 2],
    center: Piles<Vec<Card>>,
    side: Piles<Vec<Card>>,
) -> MatchState {
    let ids = two_participants();
    let [hand_a, hand_b] = hands;
    let [draw_a, draw_b] = draws;
    let players = vec![
        PlayerGameState {
            participant_id: ids[0].0,
            name: ids[0].1.clone(),
            hand: hand_a,
            draw_pile: draw_a,
        },
        PlayerGameState {
            participant_id: ids[1].0,
            name: ids[1].1.clone(),
            hand: hand_b,
            draw_pile: draw_b,
        },
    ];
    MatchState {
        phase: Phase::Playing,
        flip_votes: FlipVotes::for_participants(ids.iter().map(|(id, _)| *id)),
        players,
        center_piles: center,
        side_piles: side,
        winner: None,
        deal_seed: 7,
        reshuffles: 0,
    }
}

pub fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort();
    cards
}
