use serde::{Deserialize, Serialize};

use crate::domain::{CardId, FlipVote, MatchSnapshot, ParticipantId, PileSide, ViewerState};
use crate::errors::ErrorCode;
use crate::services::match_events::{ActionKind, Event, FinishReason};
use crate::services::roster::{ParticipantToken, RosterEntry};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Register {
        name: String,
    },
    Ready {
        token: ParticipantToken,
    },
    Play {
        token: ParticipantToken,
        card_id: CardId,
        pile: PileSide,
    },
    Draw {
        token: ParticipantToken,
    },
    Flip {
        token: ParticipantToken,
    },
    PlayAgain {
        token: ParticipantToken,
    },
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
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

    MatchFinished {
        winner_name: Option<String>,
        winner_id: Option<ParticipantId>,
        loser_id: Option<ParticipantId>,
        opponent_cards_left: Option<usize>,
        reason: FinishReason,
    },

    FlipVoteStatus {
        votes: Vec<FlipVote>,
    },

    LobbyFull {
        message: String,
    },

    Rejected {
        action: ActionKind,
        code: String,
        message: String,
    },

    Error {
        code: String,
        message: String,
    },
}

impl ServerMsg {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMsg::Error {
            code: code.as_str().to_string(),
            message: message.into(),
        }
    }
}

impl From<Event> for ServerMsg {
    fn from(event: Event) -> Self {
        match event {
            Event::Registered {
                participant_id,
                token,
                name,
            } => ServerMsg::Registered {
                participant_id,
                token,
                name,
            },
            Event::RosterUpdate { participants } => ServerMsg::RosterUpdate { participants },
            Event::CountdownTick { seconds_remaining } => {
                ServerMsg::CountdownTick { seconds_remaining }
            }
            Event::MatchStarted { game, viewer } => ServerMsg::MatchStarted { game, viewer },
            Event::StateUpdated { game, viewer } => ServerMsg::StateUpdated { game, viewer },
            Event::FlipVoteStatus { votes } => ServerMsg::FlipVoteStatus { votes },
            Event::MatchFinished {
                winner_name,
                winner_id,
                loser_id,
                opponent_cards_left,
                reason,
            } => ServerMsg::MatchFinished {
                winner_name,
                winner_id,
                loser_id,
                opponent_cards_left,
                reason,
            },
            Event::LobbyFull { message } => ServerMsg::LobbyFull { message },
            Event::Rejected { action, error } => ServerMsg::Rejected {
                action,
                code: ErrorCode::from(&error).as_str().to_string(),
                message: error.detail().to_string(),
            },
        }
    }
}
