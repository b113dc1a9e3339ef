//! Error codes for the Speed backend.
//!
//! Every code that reaches a client (WebSocket `rejected`/`error` frames or
//! HTTP problem details) is defined here. Never pass ad-hoc strings as codes.
//!
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings on the wire.

use core::fmt;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Malformed or unsupported client frame
    BadRequest,
    /// Room identifier in the URL is not acceptable
    InvalidRoomId,
    /// Display name empty after trimming, or too long
    InvalidName,
    /// General validation error
    ValidationError,

    // Game rules
    /// Action not allowed in the current phase
    PhaseMismatch,
    /// Card is not in the acting participant's hand
    CardNotInHand,
    /// Card rank is not adjacent to the pile top
    NotAdjacent,
    /// Hand already holds the maximum number of cards
    HandFull,
    /// Draw pile is exhausted
    DrawPileEmpty,

    // Lookup
    /// Token does not belong to a participant on this connection
    UnknownParticipant,
    /// General not found error
    NotFound,

    // Conflicts
    /// Room already has two participants
    LobbyFull,

    // System
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidRoomId => "INVALID_ROOM_ID",
            Self::InvalidName => "INVALID_NAME",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::NotAdjacent => "NOT_ADJACENT",
            Self::HandFull => "HAND_FULL",
            Self::DrawPileEmpty => "DRAW_PILE_EMPTY",

            Self::UnknownParticipant => "UNKNOWN_PARTICIPANT",
            Self::NotFound => "NOT_FOUND",

            Self::LobbyFull => "LOBBY_FULL",

            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::PhaseMismatch => Self::PhaseMismatch,
                ValidationKind::CardNotInHand => Self::CardNotInHand,
                ValidationKind::NotAdjacent => Self::NotAdjacent,
                ValidationKind::HandFull => Self::HandFull,
                ValidationKind::DrawPileEmpty => Self::DrawPileEmpty,
                ValidationKind::InvalidName => Self::InvalidName,
                ValidationKind::InvalidRank | ValidationKind::Other => Self::ValidationError,
            },
            DomainError::Conflict(ConflictKind::LobbyFull, _) => Self::LobbyFull,
            DomainError::NotFound(NotFoundKind::Participant, _) => Self::UnknownParticipant,
            DomainError::NotFound(NotFoundKind::Other, _) => Self::NotFound,
        }
    }
}
