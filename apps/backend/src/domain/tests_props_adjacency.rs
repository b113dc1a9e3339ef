//! Adjacency rule against an independent oracle, plus shuffle properties.

use proptest::prelude::*;

use crate::domain::cards_logic::is_adjacent;
use crate::domain::dealing::{deal, full_deck, shuffled_deck};
use crate::domain::rules::{DRAW_PILE_SIZE, HAND_CAPACITY, SIDE_PILE_SIZE};
use crate::domain::test_state_helpers::{sorted, two_participants};
use crate::domain::{test_gens, test_prelude, Rank};

fn oracle(a: u8, b: u8) -> bool {
    let d = (i16::from(a) - i16::from(b)).abs();
    d == 1 || d == 12
}

#[test]
fn adjacency_matches_oracle_for_every_pair() {
    let mut accepted = 0;
    for a in Rank::all() {
        for b in Rank::all() {
            assert_eq!(
                is_adjacent(a, b),
                oracle(a.value(), b.value()),
                "pair ({}, {})",
                a.value(),
                b.value()
            );
            if is_adjacent(a, b) {
                accepted += 1;
            }
        }
    }
    // 12 neighbouring pairs plus the ace/king wrap, both directions.
    assert_eq!(accepted, 26);
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_adjacency_is_symmetric(a in test_gens::rank(), b in test_gens::rank()) {
        prop_assert_eq!(is_adjacent(a, b), is_adjacent(b, a));
    }

    #[test]
    fn prop_shuffle_is_permutation(seed in any::<u64>()) {
        prop_assert_eq!(sorted(shuffled_deck(seed)), full_deck());
    }

    #[test]
    fn prop_deal_totals(seed in any::<u64>()) {
        let table = deal(shuffled_deck(seed), &two_participants());
        let mut total = 0;
        for p in &table.players {
            prop_assert_eq!(p.hand.len(), HAND_CAPACITY);
            prop_assert_eq!(p.draw_pile.len(), DRAW_PILE_SIZE);
            total += p.hand.len() + p.draw_pile.len();
        }
        prop_assert_eq!(table.side_piles.left.len(), SIDE_PILE_SIZE);
        prop_assert_eq!(table.side_piles.right.len(), SIDE_PILE_SIZE);
        prop_assert_eq!(table.center_piles.left.len(), 1);
        prop_assert_eq!(table.center_piles.right.len(), 1);
        total += 2 * SIDE_PILE_SIZE + 2;
        prop_assert_eq!(total, 52);
    }
}
