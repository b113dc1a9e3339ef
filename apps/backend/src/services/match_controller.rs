//! Match controller: the synchronous state machine behind one room.
//!
//! Owns the roster and the authoritative [`MatchState`]. Every inbound action
//! and countdown tick is applied to completion and returns the events the room
//! must fan out. Timers and sockets live in the room actor; nothing here
//! blocks or locks.

use tracing::{debug, info, warn};

use crate::domain::seed_derivation::derive_deal_seed;
use crate::domain::{
    draw_card, play_card, snapshot, start_match, viewer_state, vote_flip, CardId, FlipOutcome,
    MatchState, ParticipantId, Phase, PileSide, PlayOutcome, WinRecord,
};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::services::match_events::{ActionKind, Event, FinishReason, Outbound};
use crate::services::results::{results_for, MatchResult};
use crate::services::roster::{ConnectionId, ParticipantToken, Roster};

pub struct MatchController {
    room_id: String,
    roster: Roster,
    state: MatchState,
    /// Seconds left while counting down.
    countdown: Option<u32>,
    countdown_secs: u32,
    room_seed: u64,
    deals: u32,
    pending_results: Option<Vec<MatchResult>>,
}

impl MatchController {
    pub fn new(room_id: impl Into<String>, countdown_secs: u32, room_seed: u64) -> Self {
        Self {
            room_id: room_id.into(),
            roster: Roster::new(),
            state: MatchState::waiting(),
            countdown: None,
            countdown_secs,
            room_seed,
            deals: 0,
            pending_results: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn connection_of(&self, id: ParticipantId) -> Option<ConnectionId> {
        self.roster.connection_of(id)
    }

    /// Results of the last decided match, handed out once.
    pub fn take_finished_results(&mut self) -> Option<Vec<MatchResult>> {
        self.pending_results.take()
    }

    pub fn register(&mut self, conn: ConnectionId, name: &str) -> Vec<Outbound> {
        match self.roster.register(conn, name) {
            Ok(reg) => {
                // A rename mid-match must reach the dealt seat too.
                if let Some(player) = self.state.player_mut(reg.participant_id) {
                    player.name = reg.name.clone();
                }
                info!(
                    room_id = %self.room_id,
                    conn_id = %conn,
                    participant_id = %reg.participant_id,
                    name = %reg.name,
                    "[MATCH] participant registered"
                );
                vec![
                    Outbound::connection(
                        conn,
                        Event::Registered {
                            participant_id: reg.participant_id,
                            token: reg.token,
                            name: reg.name,
                        },
                    ),
                    self.roster_update(),
                ]
            }
            Err(DomainError::Conflict(ConflictKind::LobbyFull, message)) => {
                info!(room_id = %self.room_id, conn_id = %conn, "[MATCH] lobby full");
                vec![Outbound::connection(conn, Event::LobbyFull { message })]
            }
            Err(error) => vec![rejected(conn, ActionKind::Register, error)],
        }
    }

    pub fn set_ready(&mut self, conn: ConnectionId, token: ParticipantToken) -> Vec<Outbound> {
        let id = match self.roster.authorize(conn, token) {
            Ok(id) => id,
            Err(error) => return vec![rejected(conn, ActionKind::Ready, error)],
        };
        if self.state.phase != Phase::Waiting {
            return vec![rejected(conn, ActionKind::Ready, phase_error(self.state.phase))];
        }
        self.mark_ready(id)
    }

    pub fn play_again(&mut self, conn: ConnectionId, token: ParticipantToken) -> Vec<Outbound> {
        let id = match self.roster.authorize(conn, token) {
            Ok(id) => id,
            Err(error) => return vec![rejected(conn, ActionKind::PlayAgain, error)],
        };
        if self.state.phase != Phase::Finished {
            return vec![rejected(
                conn,
                ActionKind::PlayAgain,
                phase_error(self.state.phase),
            )];
        }
        self.mark_ready(id)
    }

    pub fn play(
        &mut self,
        conn: ConnectionId,
        token: ParticipantToken,
        card_id: CardId,
        side: PileSide,
    ) -> Vec<Outbound> {
        let id = match self.roster.authorize(conn, token) {
            Ok(id) => id,
            Err(error) => return vec![rejected(conn, ActionKind::Play, error)],
        };
        match play_card(&mut self.state, id, card_id, side) {
            Ok(outcome) => {
                debug!(room_id = %self.room_id, participant_id = %id, card_id = card_id.0, ?side, "[MATCH] card played");
                self.after_move(outcome)
            }
            Err(error) => {
                debug!(room_id = %self.room_id, participant_id = %id, %error, "[MATCH] play rejected");
                vec![rejected(conn, ActionKind::Play, error)]
            }
        }
    }

    pub fn draw(&mut self, conn: ConnectionId, token: ParticipantToken) -> Vec<Outbound> {
        let id = match self.roster.authorize(conn, token) {
            Ok(id) => id,
            Err(error) => return vec![rejected(conn, ActionKind::Draw, error)],
        };
        match draw_card(&mut self.state, id) {
            Ok(outcome) => self.after_move(outcome),
            Err(error) => vec![rejected(conn, ActionKind::Draw, error)],
        }
    }

    pub fn request_flip(&mut self, conn: ConnectionId, token: ParticipantToken) -> Vec<Outbound> {
        let id = match self.roster.authorize(conn, token) {
            Ok(id) => id,
            Err(error) => return vec![rejected(conn, ActionKind::Flip, error)],
        };
        let outcome = match vote_flip(&mut self.state, id) {
            Ok(outcome) => outcome,
            Err(error) => return vec![rejected(conn, ActionKind::Flip, error)],
        };

        let mut out = vec![Outbound::everyone(Event::FlipVoteStatus {
            votes: self.state.flip_votes.entries(),
        })];
        match outcome {
            FlipOutcome::Pending => {
                debug!(room_id = %self.room_id, participant_id = %id, "[MATCH] flip vote recorded");
            }
            FlipOutcome::Flipped | FlipOutcome::Reshuffled => {
                info!(room_id = %self.room_id, ?outcome, "[MATCH] flip resolved");
                out.extend(self.state_updates(false));
            }
        }
        out
    }

    /// Advance the countdown by one tick. Ticks outside `CountingDown` are
    /// stale and ignored.
    pub fn countdown_tick(&mut self) -> Vec<Outbound> {
        let Some(remaining) = self.countdown.filter(|_| self.state.phase == Phase::CountingDown)
        else {
            debug!(room_id = %self.room_id, "[MATCH] stale countdown tick ignored");
            return Vec::new();
        };

        let remaining = remaining.saturating_sub(1);
        let mut out = vec![Outbound::everyone(Event::CountdownTick {
            seconds_remaining: remaining,
        })];
        if remaining > 0 {
            self.countdown = Some(remaining);
            return out;
        }

        self.countdown = None;
        self.deals += 1;
        let deal_seed = derive_deal_seed(self.room_seed, self.deals);
        self.state = start_match(&self.roster.seats(), deal_seed);
        self.roster.clear_ready();
        info!(room_id = %self.room_id, deal_no = self.deals, deal_seed, "[MATCH] match started");

        out.extend(self.state_updates(true));
        out.push(self.roster_update());
        out
    }

    /// The connection is gone. Aborts a live match, discards a finished one.
    pub fn disconnect(&mut self, conn: ConnectionId) -> Vec<Outbound> {
        let Some(gone) = self.roster.remove_connection(conn) else {
            return Vec::new();
        };
        info!(
            room_id = %self.room_id,
            conn_id = %conn,
            participant_id = %gone.id,
            phase = ?self.state.phase,
            "[MATCH] participant left"
        );

        let mut out = Vec::new();
        match self.state.phase {
            Phase::CountingDown | Phase::Playing => {
                warn!(room_id = %self.room_id, participant_id = %gone.id, "[MATCH] match aborted by disconnect");
                out.push(Outbound::everyone(Event::MatchFinished {
                    winner_name: None,
                    winner_id: None,
                    loser_id: None,
                    opponent_cards_left: None,
                    reason: FinishReason::Disconnect,
                }));
                self.reset_to_waiting();
            }
            Phase::Finished => self.reset_to_waiting(),
            Phase::Waiting => {}
        }
        out.push(self.roster_update());
        out
    }

    fn mark_ready(&mut self, id: ParticipantId) -> Vec<Outbound> {
        self.roster.set_ready(id);
        let mut out = vec![self.roster_update()];
        if self.roster.all_ready() {
            out.push(self.begin_countdown());
        }
        out
    }

    fn begin_countdown(&mut self) -> Outbound {
        self.state = MatchState::waiting();
        self.state.phase = Phase::CountingDown;
        self.countdown = Some(self.countdown_secs);
        info!(room_id = %self.room_id, seconds = self.countdown_secs, "[MATCH] countdown started");
        Outbound::everyone(Event::CountdownTick {
            seconds_remaining: self.countdown_secs,
        })
    }

    fn reset_to_waiting(&mut self) {
        self.state = MatchState::waiting();
        self.countdown = None;
        self.roster.clear_ready();
    }

    fn after_move(&mut self, outcome: PlayOutcome) -> Vec<Outbound> {
        let mut out = self.state_updates(false);
        if let PlayOutcome::Won(record) = outcome {
            out.push(self.finish(&record));
        }
        out
    }

    fn finish(&mut self, record: &WinRecord) -> Outbound {
        let loser_name = self
            .state
            .player(record.loser)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        info!(
            room_id = %self.room_id,
            winner_id = %record.winner,
            opponent_cards_left = record.opponent_cards_left,
            "[MATCH] match won"
        );
        self.pending_results = Some(results_for(record, &loser_name));
        Outbound::everyone(Event::MatchFinished {
            winner_name: Some(record.winner_name.clone()),
            winner_id: Some(record.winner),
            loser_id: Some(record.loser),
            opponent_cards_left: Some(record.opponent_cards_left),
            reason: FinishReason::Won,
        })
    }

    /// One private snapshot per dealt participant.
    fn state_updates(&self, started: bool) -> Vec<Outbound> {
        let game = snapshot(&self.state);
        self.state
            .players
            .iter()
            .filter_map(|p| viewer_state(&self.state, p.participant_id))
            .map(|viewer| {
                let to = viewer.participant_id;
                let game = game.clone();
                let event = if started {
                    Event::MatchStarted { game, viewer }
                } else {
                    Event::StateUpdated { game, viewer }
                };
                Outbound::participant(to, event)
            })
            .collect()
    }

    fn roster_update(&self) -> Outbound {
        Outbound::everyone(Event::RosterUpdate {
            participants: self.roster.entries(),
        })
    }
}

fn rejected(conn: ConnectionId, action: ActionKind, error: DomainError) -> Outbound {
    Outbound::connection(conn, Event::Rejected { action, error })
}

fn phase_error(phase: Phase) -> DomainError {
    DomainError::validation(
        ValidationKind::PhaseMismatch,
        format!("action not allowed while {phase:?}"),
    )
}
