//! Result publication seam. The engine hands decided outcomes to a sink and
//! never touches storage itself.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::WinRecord;

/// One participant's outcome of a decided match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub player_name: String,
    pub won: bool,
    /// Set for the winner only: what the loser still held.
    pub opponent_cards_left: Option<usize>,
}

/// Winner first, then loser.
pub fn results_for(record: &WinRecord, loser_name: &str) -> Vec<MatchResult> {
    vec![
        MatchResult {
            player_name: record.winner_name.clone(),
            won: true,
            opponent_cards_left: Some(record.opponent_cards_left),
        },
        MatchResult {
            player_name: loser_name.to_string(),
            won: false,
            opponent_cards_left: None,
        },
    ]
}

/// Receives decided match results. Implementations must not block the room.
pub trait ResultSink: Send + Sync {
    fn publish(&self, room_id: &str, results: &[MatchResult]);
}

/// Default sink: structured log line per result.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogResultSink;

impl ResultSink for LogResultSink {
    fn publish(&self, room_id: &str, results: &[MatchResult]) {
        for r in results {
            info!(
                room_id,
                player_name = %r.player_name,
                won = r.won,
                opponent_cards_left = ?r.opponent_cards_left,
                "[RESULTS] match result"
            );
        }
    }
}

/// Keeps every published result in memory, tagged with its room.
#[derive(Debug, Default)]
pub struct MemoryResultSink {
    published: Mutex<Vec<(String, MatchResult)>>,
}

impl MemoryResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<(String, MatchResult)> {
        self.published.lock().clone()
    }
}

impl ResultSink for MemoryResultSink {
    fn publish(&self, room_id: &str, results: &[MatchResult]) {
        let mut published = self.published.lock();
        published.extend(results.iter().map(|r| (room_id.to_string(), r.clone())));
    }
}
