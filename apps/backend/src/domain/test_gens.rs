// Proptest generators for domain types.
// Action scripts are generated as indices so every script is valid to apply;
// whether each action is accepted is up to the rules under test.

use proptest::prelude::*;

use crate::domain::{PileSide, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    (1u8..=13).prop_map(|v| Rank::new(v).unwrap())
}

pub fn side() -> impl Strategy<Value = PileSide> {
    prop_oneof![Just(PileSide::Left), Just(PileSide::Right)]
}

/// One scripted participant action. `who` is a registry index (0 or 1);
/// `slot` picks a hand position modulo the current hand size.
#[derive(Debug, Clone, Copy)]
pub enum ScriptedAction {
    Play {
        who: usize,
        slot: usize,
        side: PileSide,
    },
    Draw {
        who: usize,
    },
    Flip {
        who: usize,
    },
}

pub fn scripted_action() -> impl Strategy<Value = ScriptedAction> {
    prop_oneof![
        6 => (0usize..2, 0usize..5, side())
            .prop_map(|(who, slot, side)| ScriptedAction::Play { who, slot, side }),
        1 => (0usize..2).prop_map(|who| ScriptedAction::Draw { who }),
        3 => (0usize..2).prop_map(|who| ScriptedAction::Flip { who }),
    ]
}

pub fn action_script(max_len: usize) -> impl Strategy<Value = Vec<ScriptedAction>> {
    prop::collection::vec(scripted_action(), 0..=max_len)
}
