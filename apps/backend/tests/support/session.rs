// Lobby helpers on top of the WebSocket client

use std::time::Duration;

use backend_test_support::ws_client::{ClientError, WebSocketClient};
use serde_json::{json, Value};

pub const WAIT: Duration = Duration::from_secs(2);

/// A connected, registered participant.
pub struct Player {
    pub client: WebSocketClient,
    pub participant_id: String,
    pub token: String,
}

impl Player {
    pub async fn send(&mut self, msg_type: &str, extra: Value) -> Result<(), ClientError> {
        let mut msg = json!({ "type": msg_type, "token": self.token });
        if let (Some(obj), Value::Object(extra)) = (msg.as_object_mut(), extra) {
            obj.extend(extra);
        }
        self.client.send_json(&msg).await
    }

    pub async fn expect(&mut self, msg_type: &str) -> Result<Value, ClientError> {
        self.client.recv_until_type(msg_type, WAIT).await
    }
}

/// Connect to `url` and register as `name`.
pub async fn register(url: &str, name: &str) -> Result<Player, ClientError> {
    let mut client = WebSocketClient::connect_retry(url, Duration::from_secs(1)).await?;
    client
        .send_json(&json!({ "type": "register", "name": name }))
        .await?;
    let registered = client.recv_until_type("registered", WAIT).await?;
    let participant_id = registered["participant_id"]
        .as_str()
        .ok_or("registered without participant_id")?
        .to_string();
    let token = registered["token"]
        .as_str()
        .ok_or("registered without token")?
        .to_string();
    Ok(Player {
        client,
        participant_id,
        token,
    })
}

pub async fn ready_up(player: &mut Player) -> Result<(), ClientError> {
    player.send("ready", json!({})).await
}

/// Register two players in `url`'s room, ready both and wait until each has
/// received its `match_started`. Returns the players and their start frames.
pub async fn start_match(url: &str) -> Result<(Player, Value, Player, Value), ClientError> {
    let mut ana = register(url, "ana").await?;
    let mut ben = register(url, "ben").await?;
    ready_up(&mut ana).await?;
    ready_up(&mut ben).await?;
    let ana_start = ana.expect("match_started").await?;
    let ben_start = ben.expect("match_started").await?;
    Ok((ana, ana_start, ben, ben_start))
}
