use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::roster::ConnectionId;
use crate::state::app_state::AppState;
use crate::ws::hub::RoomHub;
use crate::ws::protocol::{ClientMsg, ServerMsg};
use crate::ws::room::{Inbound, Join, Leave, MatchRoom, RoomEvent};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);
const MAX_ROOM_ID_LEN: usize = 64;

fn validate_room_id(room_id: &str) -> Result<(), AppError> {
    let ok = !room_id.is_empty()
        && room_id.len() <= MAX_ROOM_ID_LEN
        && room_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(AppError::bad_request(
            ErrorCode::InvalidRoomId,
            format!(
                "room id must be 1..={MAX_ROOM_ID_LEN} characters of letters, digits, '-' or '_'"
            ),
        ))
    }
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    room_id: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let room_id = room_id.into_inner();
    validate_room_id(&room_id)?;
    // Reject non-upgrade requests before a room is started for them.
    ws::handshake(&req)?;

    let hub = app_state.hub.clone();
    let room = hub.get_or_start(&room_id);
    let session = WsSession::new(ConnectionId::new_random(), room_id, room, hub);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn: ConnectionId,
    room_id: String,
    room: Addr<MatchRoom>,
    hub: Arc<RoomHub>,

    last_heartbeat: Instant,
    heartbeat_handle: Option<SpawnHandle>,

    joined: bool,
    /// Frames received before the room acknowledged the join.
    pending: Vec<ClientMsg>,
}

impl WsSession {
    fn new(conn: ConnectionId, room_id: String, room: Addr<MatchRoom>, hub: Arc<RoomHub>) -> Self {
        Self {
            conn,
            room_id,
            room,
            hub,
            last_heartbeat: Instant::now(),
            heartbeat_handle: None,
            joined: false,
            pending: Vec::new(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_json(ctx, &ServerMsg::error(code, message));
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let handle = ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn,
                    room_id = %actor.room_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
        self.heartbeat_handle = Some(handle);
    }

    /// Join the room. A room that stopped between lookup and join is
    /// replaced once through the hub.
    fn join(&mut self, ctx: &mut ws::WebsocketContext<Self>, retry: bool) {
        let join = Join {
            conn: self.conn,
            recipient: ctx.address().recipient::<RoomEvent>(),
        };
        let fut = self
            .room
            .send(join)
            .into_actor(self)
            .map(move |res, actor, ctx| match res {
                Ok(()) => {
                    actor.joined = true;
                    for msg in std::mem::take(&mut actor.pending) {
                        actor.forward(msg);
                    }
                }
                Err(err) if retry => {
                    warn!(conn_id = %actor.conn, room_id = %actor.room_id, error = %err, "[WS SESSION] room gone, retrying join");
                    actor.room = actor.hub.get_or_start(&actor.room_id);
                    actor.join(ctx, false);
                }
                Err(err) => {
                    tracing::error!(conn_id = %actor.conn, room_id = %actor.room_id, error = %err, "[WS SESSION] join failed");
                    actor.send_error_and_close(ctx, ErrorCode::InternalError, "Room unavailable");
                }
            });
        ctx.spawn(fut);
    }

    fn forward(&self, msg: ClientMsg) {
        self.room.do_send(Inbound {
            conn: self.conn,
            msg,
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn,
            room_id = %self.room_id,
            "[WS SESSION] started"
        );
        self.join(ctx, true);
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.room.do_send(Leave { conn: self.conn });
        info!(
            conn_id = %self.conn,
            room_id = %self.room_id,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let cmd = match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => cmd,
                    Err(err) => {
                        Self::send_json(
                            ctx,
                            &ServerMsg::error(ErrorCode::BadRequest, format!("Malformed message: {err}")),
                        );
                        return;
                    }
                };

                if self.joined {
                    self.forward(cmd);
                } else {
                    self.pending.push(cmd);
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn,
                    room_id = %self.room_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<RoomEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: RoomEvent, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
