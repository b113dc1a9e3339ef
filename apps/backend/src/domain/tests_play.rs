//! Play, draw and win rules on hand-built tables.

use crate::domain::play::{draw_card, play_card, start_match, PlayOutcome};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{card, dealt, table, two_participants};
use crate::domain::{PileSide, Piles, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn kind_of(err: DomainError) -> Option<ValidationKind> {
    match err {
        DomainError::Validation(kind, _) => Some(kind),
        _ => None,
    }
}

#[test]
fn five_on_six_is_accepted() {
    let five = card(5, Suit::Clubs);
    let mut state = table(
        [vec![five, card(10, Suit::Clubs)], vec![card(2, Suit::Hearts)]],
        [vec![card(11, Suit::Clubs)], vec![]],
        Piles {
            left: vec![card(6, Suit::Hearts)],
            right: vec![card(9, Suit::Spades)],
        },
        Piles::default(),
    );
    let a = state.players[0].participant_id;

    let outcome = play_card(&mut state, a, five.id, PileSide::Left).unwrap();

    assert_eq!(outcome, PlayOutcome::Continued);
    assert_eq!(state.top(PileSide::Left), Some(five));
    assert_eq!(state.center_piles.left.len(), 2);
    // Played card gone, refilled from the draw pile.
    assert!(state.players[0].hand_card(five.id).is_none());
    assert_eq!(state.players[0].hand.len(), 2);
    assert!(state.players[0].draw_pile.is_empty());
}

#[test]
fn five_on_seven_is_rejected_without_change() {
    let five = card(5, Suit::Clubs);
    let mut state = table(
        [vec![five], vec![card(2, Suit::Hearts)]],
        [vec![card(11, Suit::Clubs)], vec![]],
        Piles {
            left: vec![card(7, Suit::Hearts)],
            right: vec![card(9, Suit::Spades)],
        },
        Piles::default(),
    );
    let a = state.players[0].participant_id;
    let before = state.clone();

    let err = play_card(&mut state, a, five.id, PileSide::Left).unwrap_err();

    assert_eq!(kind_of(err), Some(ValidationKind::NotAdjacent));
    assert_eq!(state, before);
}

#[test]
fn ace_and_king_wrap_on_the_table() {
    let ace = card(1, Suit::Hearts);
    let king = card(13, Suit::Diamonds);
    let mut state = table(
        [vec![ace, card(4, Suit::Clubs)], vec![king, card(4, Suit::Hearts)]],
        [vec![], vec![]],
        Piles {
            left: vec![card(13, Suit::Spades)],
            right: vec![card(1, Suit::Spades)],
        },
        Piles::default(),
    );
    let (a, b) = (state.players[0].participant_id, state.players[1].participant_id);

    play_card(&mut state, a, ace.id, PileSide::Left).unwrap();
    play_card(&mut state, b, king.id, PileSide::Right).unwrap();

    assert_eq!(state.top(PileSide::Left), Some(ace));
    assert_eq!(state.top(PileSide::Right), Some(king));
}

#[test]
fn card_from_someone_elses_hand_is_rejected() {
    let theirs = card(5, Suit::Hearts);
    let mut state = table(
        [vec![card(9, Suit::Clubs)], vec![theirs]],
        [vec![], vec![]],
        Piles {
            left: vec![card(6, Suit::Spades)],
            right: vec![card(6, Suit::Clubs)],
        },
        Piles::default(),
    );
    let a = state.players[0].participant_id;

    let err = play_card(&mut state, a, theirs.id, PileSide::Left).unwrap_err();
    assert_eq!(kind_of(err), Some(ValidationKind::CardNotInHand));
}

#[test]
fn conflicting_plays_resolve_by_arrival_order() {
    let a_five = card(5, Suit::Clubs);
    let b_seven = card(7, Suit::Hearts);
    let mut state = table(
        [vec![a_five, card(12, Suit::Clubs)], vec![b_seven, card(12, Suit::Hearts)]],
        [vec![], vec![]],
        Piles {
            left: vec![card(6, Suit::Spades)],
            right: vec![card(10, Suit::Spades)],
        },
        Piles::default(),
    );
    let (a, b) = (state.players[0].participant_id, state.players[1].participant_id);

    play_card(&mut state, a, a_five.id, PileSide::Left).unwrap();
    // Seven was legal on the six, but the five got there first.
    let err = play_card(&mut state, b, b_seven.id, PileSide::Left).unwrap_err();
    assert_eq!(kind_of(err), Some(ValidationKind::NotAdjacent));
}

#[test]
fn emptying_hand_and_draw_pile_wins() {
    let last = card(5, Suit::Clubs);
    let mut state = table(
        [vec![last], vec![card(2, Suit::Hearts), card(3, Suit::Hearts)]],
        [vec![], vec![card(9, Suit::Hearts), card(10, Suit::Hearts), card(11, Suit::Hearts)]],
        Piles {
            left: vec![card(6, Suit::Spades)],
            right: vec![card(12, Suit::Spades)],
        },
        Piles::default(),
    );
    let (a, b) = (state.players[0].participant_id, state.players[1].participant_id);

    let outcome = play_card(&mut state, a, last.id, PileSide::Left).unwrap();

    let PlayOutcome::Won(record) = outcome else {
        panic!("expected a win, got {outcome:?}");
    };
    assert_eq!(record.winner, a);
    assert_eq!(record.loser, b);
    assert_eq!(record.winner_name, "ana");
    assert_eq!(record.opponent_cards_left, 5);
    assert_eq!(state.phase, Phase::Finished);
    assert_eq!(state.winner, Some(record));
}

#[test]
fn empty_hand_with_cards_left_to_draw_is_not_a_win() {
    let only = card(5, Suit::Clubs);
    let refill = card(9, Suit::Clubs);
    let mut state = table(
        [vec![only], vec![card(2, Suit::Hearts)]],
        [vec![refill], vec![]],
        Piles {
            left: vec![card(6, Suit::Spades)],
            right: vec![card(12, Suit::Spades)],
        },
        Piles::default(),
    );
    let a = state.players[0].participant_id;

    let outcome = play_card(&mut state, a, only.id, PileSide::Left).unwrap();

    assert_eq!(outcome, PlayOutcome::Continued);
    assert_eq!(state.players[0].hand, vec![refill]);
    assert_eq!(state.phase, Phase::Playing);
}

#[test]
fn actions_after_finish_are_phase_mismatch() {
    let last = card(5, Suit::Clubs);
    let b_card = card(7, Suit::Hearts);
    let mut state = table(
        [vec![last], vec![b_card]],
        [vec![], vec![card(2, Suit::Clubs)]],
        Piles {
            left: vec![card(6, Suit::Spades)],
            right: vec![card(6, Suit::Hearts)],
        },
        Piles::default(),
    );
    let (a, b) = (state.players[0].participant_id, state.players[1].participant_id);
    play_card(&mut state, a, last.id, PileSide::Left).unwrap();

    let err = play_card(&mut state, b, b_card.id, PileSide::Right).unwrap_err();
    assert_eq!(kind_of(err), Some(ValidationKind::PhaseMismatch));
    let err = draw_card(&mut state, b).unwrap_err();
    assert_eq!(kind_of(err), Some(ValidationKind::PhaseMismatch));
}

#[test]
fn draw_respects_capacity_and_pile() {
    let mut state = dealt(3);
    let a = state.players[0].participant_id;

    let err = draw_card(&mut state, a).unwrap_err();
    assert_eq!(kind_of(err), Some(ValidationKind::HandFull));

    let mut short = table(
        [vec![card(1, Suit::Clubs)], vec![card(2, Suit::Clubs)]],
        [vec![card(3, Suit::Clubs)], vec![]],
        Piles {
            left: vec![card(8, Suit::Spades)],
            right: vec![card(8, Suit::Hearts)],
        },
        Piles::default(),
    );
    let (a, b) = (short.players[0].participant_id, short.players[1].participant_id);
    draw_card(&mut short, a).unwrap();
    assert_eq!(short.players[0].hand.len(), 2);
    assert!(short.players[0].draw_pile.is_empty());

    let err = draw_card(&mut short, b).unwrap_err();
    assert_eq!(kind_of(err), Some(ValidationKind::DrawPileEmpty));
}

#[test]
fn start_match_seeds_center_with_last_two_cards() {
    let seed = 0xC0FFEE;
    let deck = crate::domain::dealing::shuffled_deck(seed);
    let state = start_match(&two_participants(), seed);

    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.top(PileSide::Left), Some(deck[51]));
    assert_eq!(state.top(PileSide::Right), Some(deck[50]));
    assert_eq!(state.deal_seed, seed);
    assert!(state.flip_votes.entries().iter().all(|v| !v.voted));
}
