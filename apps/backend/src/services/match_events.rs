//! Events produced by the match controller and who should receive them.

use serde::{Deserialize, Serialize};

use crate::domain::{FlipVote, MatchSnapshot, ParticipantId, ViewerState};
use crate::errors::DomainError;
use crate::services::roster::{ConnectionId, ParticipantToken, RosterEntry};

/// The action a rejection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Register,
    Ready,
    Play,
    Draw,
    Flip,
    PlayAgain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Won,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Registered {
        participant_id: ParticipantId,
        token: ParticipantToken,
        name: String,
    },
    RosterUpdate {
        participants: Vec<RosterEntry>,
    },
    CountdownTick {
        seconds_remaining: u32,
    },
    MatchStarted {
        game: MatchSnapshot,
        viewer: ViewerState,
    },
    StateUpdated {
        game: MatchSnapshot,
        viewer: ViewerState,
    },
    FlipVoteStatus {
        votes: Vec<FlipVote>,
    },
    MatchFinished {
        winner_name: Option<String>,
        winner_id: Option<ParticipantId>,
        loser_id: Option<ParticipantId>,
        opponent_cards_left: Option<usize>,
        reason: FinishReason,
    },
    LobbyFull {
        message: String,
    },
    Rejected {
        action: ActionKind,
        error: DomainError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Every connection in the room, registered or not.
    Everyone,
    Participant(ParticipantId),
    Connection(ConnectionId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub to: Audience,
    pub event: Event,
}

impl Outbound {
    pub fn everyone(event: Event) -> Self {
        Self {
            to: Audience::Everyone,
            event,
        }
    }

    pub fn participant(id: ParticipantId, event: Event) -> Self {
        Self {
            to: Audience::Participant(id),
            event,
        }
    }

    pub fn connection(conn: ConnectionId, event: Event) -> Self {
        Self {
            to: Audience::Connection(conn),
            event,
        }
    }
}
