use crate::domain::{Card, Piles, Rank};

/// Adjacency rule: ranks one apart, or the ace/king wraparound pair.
pub fn is_adjacent(card: Rank, pile_top: Rank) -> bool {
    let (a, b) = (card.value(), pile_top.value());
    a.abs_diff(b) == 1 || (a.min(b) == Rank::ACE.value() && a.max(b) == Rank::KING.value())
}

/// True if any card in `hand` can go onto either visible top.
pub fn has_legal_move(hand: &[Card], tops: &Piles<Option<Card>>) -> bool {
    hand.iter().any(|card| {
        [tops.left, tops.right]
            .into_iter()
            .flatten()
            .any(|top| is_adjacent(card.rank, top.rank))
    })
}
