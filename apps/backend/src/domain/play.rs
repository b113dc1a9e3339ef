//! Pure match transitions: starting a deal, playing, drawing, voting to flip.
//!
//! Every function validates first and mutates only on success, so a rejected
//! action leaves the state exactly as it was.

use crate::domain::cards_logic::is_adjacent;
use crate::domain::dealing::{deal, shuffled_deck};
use crate::domain::flip::{resolve_flip, FlipOutcome, FlipVotes};
use crate::domain::rules::HAND_CAPACITY;
use crate::domain::state::{MatchState, ParticipantId, Phase, WinRecord};
use crate::domain::{CardId, PileSide};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// What a successful play or draw led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Continued,
    Won(WinRecord),
}

/// Shuffle, deal and enter `Playing`.
pub fn start_match(participants: &[(ParticipantId, String)], deal_seed: u64) -> MatchState {
    let table = deal(shuffled_deck(deal_seed), participants);
    MatchState {
        phase: Phase::Playing,
        flip_votes: FlipVotes::for_participants(participants.iter().map(|(id, _)| *id)),
        players: table.players,
        center_piles: table.center_piles,
        side_piles: table.side_piles,
        winner: None,
        deal_seed,
        reshuffles: 0,
    }
}

fn require_playing(state: &MatchState) -> Result<(), DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("action requires playing phase, match is {:?}", state.phase),
        ));
    }
    Ok(())
}

fn unknown_player(id: ParticipantId) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Participant,
        format!("participant {id} is not in this match"),
    )
}

/// Play `card_id` from `id`'s hand onto the `side` center pile.
pub fn play_card(
    state: &mut MatchState,
    id: ParticipantId,
    card_id: CardId,
    side: PileSide,
) -> Result<PlayOutcome, DomainError> {
    require_playing(state)?;

    let top = state.top(side);
    let player = state.player(id).ok_or_else(|| unknown_player(id))?;
    let card = player.hand_card(card_id).copied().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {} is not in hand", card_id.0),
        )
    })?;

    // Center piles are never empty while playing; treat a missing top as a
    // non-match rather than a free slot.
    let fits = top.is_some_and(|top| is_adjacent(card.rank, top.rank));
    if !fits {
        return Err(DomainError::validation(
            ValidationKind::NotAdjacent,
            format!("card {} does not fit on the {side:?} pile", card_id.0),
        ));
    }

    let player = state.player_mut(id).ok_or_else(|| unknown_player(id))?;
    player.take_from_hand(card_id);
    player.refill_one();
    state.center_piles.get_mut(side).push(card);
    state.flip_votes.clear();

    Ok(check_win(state, id))
}

/// Move one card from `id`'s draw pile into their hand.
pub fn draw_card(state: &mut MatchState, id: ParticipantId) -> Result<PlayOutcome, DomainError> {
    require_playing(state)?;

    let player = state.player_mut(id).ok_or_else(|| unknown_player(id))?;
    if player.hand.len() >= HAND_CAPACITY {
        return Err(DomainError::validation(
            ValidationKind::HandFull,
            "hand already holds five cards",
        ));
    }
    if player.draw_pile.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::DrawPileEmpty,
            "draw pile is empty",
        ));
    }
    player.refill_one();

    Ok(check_win(state, id))
}

/// Record a flip vote and apply the flip once every participant agrees.
pub fn vote_flip(state: &mut MatchState, id: ParticipantId) -> Result<FlipOutcome, DomainError> {
    require_playing(state)?;
    if state.player(id).is_none() {
        return Err(unknown_player(id));
    }
    state.flip_votes.record(id);
    Ok(resolve_flip(state))
}

/// Apply the win condition for the acting participant.
fn check_win(state: &mut MatchState, id: ParticipantId) -> PlayOutcome {
    let Some(winner) = state.player(id).filter(|p| p.has_won()) else {
        return PlayOutcome::Continued;
    };
    let winner_name = winner.name.clone();
    let Some(loser) = state.players.iter().find(|p| p.participant_id != id) else {
        return PlayOutcome::Continued;
    };

    let record = WinRecord {
        winner: id,
        winner_name,
        loser: loser.participant_id,
        opponent_cards_left: loser.cards_left(),
    };
    state.phase = Phase::Finished;
    state.winner = Some(record.clone());
    PlayOutcome::Won(record)
}
