//! Deterministic deck building, dealing and center-pile reshuffling.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::{
    DECK_SIZE, DRAW_PILE_SIZE, HAND_CAPACITY, PLAYERS, SIDE_PILE_SIZE,
};
use crate::domain::state::{ParticipantId, PlayerGameState};
use crate::domain::{Card, Piles, Rank, Suit};

/// Generate a full 52-card deck in standard order (suit-major, ace first).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::all() {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// Fisher-Yates shuffle: walk from the end, swap each slot with a uniformly
/// chosen slot at or below it.
pub fn shuffle_with_seed(cards: &mut [Card], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for i in (1..cards.len()).rev() {
        let j = rng.random_range(0..=i);
        cards.swap(i, j);
    }
}

pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, seed);
    deck
}

/// Result of distributing a deck across the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealtTable {
    pub players: Vec<PlayerGameState>,
    pub side_piles: Piles<Vec<Card>>,
    pub center_piles: Piles<Vec<Card>>,
}

/// Distribute a full deck.
///
/// Per participant in registry order: hand first, then draw pile, both taken
/// from the front of the deck. Then the left and right side piles. The last
/// card becomes the left center pile, the next-to-last the right one.
///
/// Panics if the deck or participant count is wrong; both are fixed by
/// construction and a mismatch means the engine itself is broken.
pub fn deal(deck: Vec<Card>, participants: &[(ParticipantId, String)]) -> DealtTable {
    assert_eq!(deck.len(), DECK_SIZE, "deal requires a full deck");
    assert_eq!(participants.len(), PLAYERS, "deal requires exactly two participants");

    let mut rest = deck.into_iter();
    let mut take = |n: usize| -> Vec<Card> { rest.by_ref().take(n).collect() };

    let players = participants
        .iter()
        .map(|(id, name)| {
            let hand = take(HAND_CAPACITY);
            let draw_pile = take(DRAW_PILE_SIZE);
            PlayerGameState {
                participant_id: *id,
                name: name.clone(),
                hand,
                draw_pile,
            }
        })
        .collect();

    let side_piles = Piles {
        left: take(SIDE_PILE_SIZE),
        right: take(SIDE_PILE_SIZE),
    };

    let mut remaining = take(DECK_SIZE);
    assert_eq!(remaining.len(), 2, "two cards must remain for the center piles");
    let left_top = remaining.pop();
    let right_top = remaining.pop();
    let center_piles = Piles {
        left: left_top.into_iter().collect(),
        right: right_top.into_iter().collect(),
    };

    DealtTable {
        players,
        side_piles,
        center_piles,
    }
}

/// Rebuild the piles once the side piles can no longer feed a flip.
///
/// Gathers everything in both center piles (plus any card still left in a
/// side pile), shuffles, puts one card on each center pile and splits the
/// rest: first half (rounded down) to the left side pile, the rest right.
pub fn reshuffle_center_piles(
    center_piles: &mut Piles<Vec<Card>>,
    side_piles: &mut Piles<Vec<Card>>,
    seed: u64,
) {
    let mut pool: Vec<Card> = Vec::new();
    pool.append(&mut center_piles.left);
    pool.append(&mut center_piles.right);
    pool.append(&mut side_piles.left);
    pool.append(&mut side_piles.right);

    shuffle_with_seed(&mut pool, seed);

    center_piles.left.extend(pool.pop());
    center_piles.right.extend(pool.pop());

    let half = pool.len() / 2;
    side_piles.right = pool.split_off(half);
    side_piles.left = pool;
}
