//! Services: the stateful match controller and its collaborators.

pub mod match_controller;
pub mod match_events;
pub mod results;
pub mod roster;


pub use match_controller::MatchController;
pub use match_events::{ActionKind, Audience, Event, FinishReason, Outbound};
pub use results::{LogResultSink, MatchResult, MemoryResultSink, ResultSink};
pub use roster::{ConnectionId, ParticipantToken, Roster, RosterEntry};
