//! One actor per room. Serializes every inbound action and countdown tick
//! through its mailbox, applies it to the [`MatchController`], and fans the
//! resulting events out to the room's sessions.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use actix::prelude::*;
use tracing::{debug, info};

use crate::domain::Phase;
use crate::services::match_controller::MatchController;
use crate::services::match_events::{Audience, Outbound};
use crate::services::results::ResultSink;
use crate::services::roster::ConnectionId;
use crate::ws::hub::RoomHub;
use crate::ws::protocol::{ClientMsg, ServerMsg};

/// Outbound frame for one session.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct RoomEvent(pub ServerMsg);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Join {
    pub conn: ConnectionId,
    pub recipient: Recipient<RoomEvent>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Leave {
    pub conn: ConnectionId,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Inbound {
    pub conn: ConnectionId,
    pub msg: ClientMsg,
}

pub struct MatchRoom {
    room_id: String,
    controller: MatchController,
    sessions: HashMap<ConnectionId, Recipient<RoomEvent>>,
    tick: Duration,
    countdown: Option<SpawnHandle>,
    sink: Arc<dyn ResultSink>,
    hub: Arc<RoomHub>,
}

impl MatchRoom {
    pub fn new(
        room_id: String,
        controller: MatchController,
        tick: Duration,
        sink: Arc<dyn ResultSink>,
        hub: Arc<RoomHub>,
    ) -> Self {
        Self {
            room_id,
            controller,
            sessions: HashMap::new(),
            tick,
            countdown: None,
            sink,
            hub,
        }
    }

    fn send_to(&self, conn: ConnectionId, msg: ServerMsg) {
        if let Some(recipient) = self.sessions.get(&conn) {
            recipient.do_send(RoomEvent(msg));
        }
    }

    fn dispatch(&self, out: Vec<Outbound>) {
        for Outbound { to, event } in out {
            let msg = ServerMsg::from(event);
            match to {
                Audience::Everyone => {
                    for recipient in self.sessions.values() {
                        recipient.do_send(RoomEvent(msg.clone()));
                    }
                }
                Audience::Participant(id) => {
                    if let Some(conn) = self.controller.connection_of(id) {
                        self.send_to(conn, msg);
                    }
                }
                Audience::Connection(conn) => self.send_to(conn, msg),
            }
        }
    }

    /// Fan out, publish any decided result, and line the countdown timer up
    /// with the phase.
    fn settle(&mut self, out: Vec<Outbound>, ctx: &mut Context<Self>) {
        self.dispatch(out);

        if let Some(results) = self.controller.take_finished_results() {
            self.sink.publish(&self.room_id, &results);
        }

        let counting = self.controller.phase() == Phase::CountingDown;
        match (counting, self.countdown) {
            (true, None) => {
                debug!(room_id = %self.room_id, "[ROOM] countdown timer started");
                let handle = ctx.run_interval(self.tick, |room, ctx| {
                    let out = room.controller.countdown_tick();
                    room.settle(out, ctx);
                });
                self.countdown = Some(handle);
            }
            (false, Some(handle)) => {
                debug!(room_id = %self.room_id, "[ROOM] countdown timer cancelled");
                ctx.cancel_future(handle);
                self.countdown = None;
            }
            _ => {}
        }
    }
}

impl Actor for MatchRoom {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(room_id = %self.room_id, "[ROOM] started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(room_id = %self.room_id, "[ROOM] stopped");
    }
}

impl Handler<Join> for MatchRoom {
    type Result = ();

    fn handle(&mut self, msg: Join, _ctx: &mut Self::Context) -> Self::Result {
        debug!(room_id = %self.room_id, conn_id = %msg.conn, "[ROOM] session joined");
        self.sessions.insert(msg.conn, msg.recipient);
        // Late joiners see who is already here.
        self.send_to(
            msg.conn,
            ServerMsg::RosterUpdate {
                participants: self.controller.roster().entries(),
            },
        );
    }
}

impl Handler<Leave> for MatchRoom {
    type Result = ();

    fn handle(&mut self, msg: Leave, ctx: &mut Self::Context) -> Self::Result {
        self.sessions.remove(&msg.conn);
        let out = self.controller.disconnect(msg.conn);
        self.settle(out, ctx);
        debug!(
            room_id = %self.room_id,
            conn_id = %msg.conn,
            sessions = self.sessions.len(),
            "[ROOM] session left"
        );

        if self.sessions.is_empty() {
            self.hub.remove(&self.room_id, &ctx.address());
            ctx.stop();
        }
    }
}

impl Handler<Inbound> for MatchRoom {
    type Result = ();

    fn handle(&mut self, msg: Inbound, ctx: &mut Self::Context) -> Self::Result {
        let Inbound { conn, msg } = msg;
        let ctl = &mut self.controller;
        let out = match msg {
            ClientMsg::Register { name } => ctl.register(conn, &name),
            ClientMsg::Ready { token } => ctl.set_ready(conn, token),
            ClientMsg::Play {
                token,
                card_id,
                pile,
            } => ctl.play(conn, token, card_id, pile),
            ClientMsg::Draw { token } => ctl.draw(conn, token),
            ClientMsg::Flip { token } => ctl.request_flip(conn, token),
            ClientMsg::PlayAgain { token } => ctl.play_again(conn, token),
        };
        self.settle(out, ctx);
    }
}
