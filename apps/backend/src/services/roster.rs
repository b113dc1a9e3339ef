//! Registered participants of one room: identity, secret token, ready flag.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::rules::{MAX_NAME_LEN, PLAYERS};
use crate::domain::ParticipantId;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

/// Secret issued at registration; required on every later action.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantToken(pub Uuid);

/// One WebSocket connection within a room.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub token: ParticipantToken,
    pub conn: ConnectionId,
    pub name: String,
    pub ready: bool,
}

/// Public roster line; never carries the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub participant_id: ParticipantId,
    pub name: String,
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub participant_id: ParticipantId,
    pub token: ParticipantToken,
    pub name: String,
}

fn normalize_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            "name must not be empty",
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            format!("name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(name.to_string())
}

/// At most two participants, kept in registration order.
#[derive(Debug, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `conn` under `name`. A connection that is already registered
    /// keeps its identity and token and only changes its name.
    pub fn register(&mut self, conn: ConnectionId, name: &str) -> Result<Registration, DomainError> {
        let name = normalize_name(name)?;

        if let Some(existing) = self.participants.iter_mut().find(|p| p.conn == conn) {
            existing.name = name;
            return Ok(Registration {
                participant_id: existing.id,
                token: existing.token,
                name: existing.name.clone(),
            });
        }

        if self.participants.len() >= PLAYERS {
            return Err(DomainError::conflict(
                ConflictKind::LobbyFull,
                "Lobby is full, only two players allowed.",
            ));
        }

        let participant = Participant {
            id: ParticipantId::new_random(),
            token: ParticipantToken(Uuid::new_v4()),
            conn,
            name: name.clone(),
            ready: false,
        };
        let registration = Registration {
            participant_id: participant.id,
            token: participant.token,
            name,
        };
        self.participants.push(participant);
        Ok(registration)
    }

    /// Resolve `token` to a participant, but only for the connection it was
    /// issued to.
    pub fn authorize(
        &self,
        conn: ConnectionId,
        token: ParticipantToken,
    ) -> Result<ParticipantId, DomainError> {
        self.participants
            .iter()
            .find(|p| p.token == token && p.conn == conn)
            .map(|p| p.id)
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Participant, "unknown participant token")
            })
    }

    /// Returns true if the flag changed.
    pub fn set_ready(&mut self, id: ParticipantId) -> bool {
        match self.participants.iter_mut().find(|p| p.id == id) {
            Some(p) if !p.ready => {
                p.ready = true;
                true
            }
            _ => false,
        }
    }

    pub fn all_ready(&self) -> bool {
        self.participants.len() == PLAYERS && self.participants.iter().all(|p| p.ready)
    }

    pub fn clear_ready(&mut self) {
        self.participants.iter_mut().for_each(|p| p.ready = false);
    }

    pub fn remove_connection(&mut self, conn: ConnectionId) -> Option<Participant> {
        let idx = self.participants.iter().position(|p| p.conn == conn)?;
        Some(self.participants.remove(idx))
    }

    pub fn connection_of(&self, id: ParticipantId) -> Option<ConnectionId> {
        self.participants.iter().find(|p| p.id == id).map(|p| p.conn)
    }

    pub fn name_of(&self, id: ParticipantId) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    /// `(id, name)` pairs in registration order, as the dealer wants them.
    pub fn seats(&self) -> Vec<(ParticipantId, String)> {
        self.participants
            .iter()
            .map(|p| (p.id, p.name.clone()))
            .collect()
    }

    pub fn entries(&self) -> Vec<RosterEntry> {
        self.participants
            .iter()
            .map(|p| RosterEntry {
                participant_id: p.id,
                name: p.name.clone(),
                ready: p.ready,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
