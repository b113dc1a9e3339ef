use std::sync::Arc;

use actix::prelude::*;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;

use crate::config::GameConfig;
use crate::services::match_controller::MatchController;
use crate::services::results::ResultSink;
use crate::ws::room::MatchRoom;

/// Registry of live rooms keyed by room id. A room is created by the first
/// connection and removes itself when its last session leaves.
pub struct RoomHub {
    rooms: DashMap<String, Addr<MatchRoom>>,
    config: GameConfig,
    sink: Arc<dyn ResultSink>,
}

impl RoomHub {
    pub fn new(config: GameConfig, sink: Arc<dyn ResultSink>) -> Arc<Self> {
        Arc::new(Self {
            rooms: DashMap::new(),
            config,
            sink,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Address of the live room for `room_id`, starting one if needed.
    /// Must be called from within an actix system.
    pub fn get_or_start(self: &Arc<Self>, room_id: &str) -> Addr<MatchRoom> {
        match self.rooms.entry(room_id.to_string()) {
            Entry::Occupied(mut slot) => {
                if slot.get().connected() {
                    return slot.get().clone();
                }
                let addr = self.start_room(room_id);
                slot.insert(addr.clone());
                addr
            }
            Entry::Vacant(slot) => {
                let addr = self.start_room(room_id);
                slot.insert(addr.clone());
                addr
            }
        }
    }

    fn start_room(self: &Arc<Self>, room_id: &str) -> Addr<MatchRoom> {
        let seed = self.config.room_seed();
        info!(room_id, "[HUB] starting room");
        let controller = MatchController::new(room_id, self.config.countdown_secs, seed);
        MatchRoom::new(
            room_id.to_string(),
            controller,
            self.config.tick,
            self.sink.clone(),
            self.clone(),
        )
        .start()
    }

    /// Remove `room_id` if it still maps to `addr`.
    pub fn remove(&self, room_id: &str, addr: &Addr<MatchRoom>) {
        self.rooms.remove_if(room_id, |_, current| current == addr);
    }

    pub fn active_rooms(&self) -> usize {
        self.rooms.len()
    }
}
