//! Snapshot and viewer visibility.

use crate::domain::player_view::viewer_state;
use crate::domain::snapshot::snapshot;
use crate::domain::state::ParticipantId;
use crate::domain::test_state_helpers::{card, dealt, table};
use crate::domain::{PileSide, Piles, Suit};

#[test]
fn snapshot_carries_counts_not_hands() {
    let state = dealt(21);
    let snap = snapshot(&state);

    assert_eq!(snap.players.len(), 2);
    for p in &snap.players {
        assert_eq!(p.hand_count, 5);
        assert_eq!(p.draw_count, 15);
    }
    assert_eq!(snap.center.left.size, 1);
    assert_eq!(snap.center.left.top, state.top(PileSide::Left));
    assert_eq!(snap.side_counts, Piles { left: 5, right: 5 });
    assert!(snap.winner_id.is_none());

    let json = serde_json::to_value(&snap).unwrap();
    assert!(json["players"][0].get("hand").is_none());
    assert_eq!(json["phase"], "playing");
}

#[test]
fn viewer_sees_only_own_hand() {
    let state = dealt(22);
    let (a, b) = (state.players[0].participant_id, state.players[1].participant_id);

    let view = viewer_state(&state, a).unwrap();
    assert_eq!(view.hand, state.players[0].hand);
    assert_eq!(view.draw_count, 15);

    let json = serde_json::to_string(&view).unwrap();
    for card in &state.players[1].hand {
        let rendered = serde_json::to_string(card).unwrap();
        assert!(!json.contains(&rendered), "opponent card leaked into view");
    }
    assert!(viewer_state(&state, b).is_some());
    assert!(viewer_state(&state, ParticipantId::new_random()).is_none());
}

#[test]
fn can_play_reflects_center_tops() {
    let state = table(
        [vec![card(5, Suit::Clubs)], vec![card(9, Suit::Clubs)]],
        [vec![], vec![]],
        Piles {
            left: vec![card(6, Suit::Spades)],
            right: vec![card(6, Suit::Hearts)],
        },
        Piles::default(),
    );
    let (a, b) = (state.players[0].participant_id, state.players[1].participant_id);

    assert!(viewer_state(&state, a).unwrap().can_play);
    assert!(!viewer_state(&state, b).unwrap().can_play);
}
