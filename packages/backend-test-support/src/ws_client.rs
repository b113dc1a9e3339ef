//! WebSocket client for driving the realtime endpoint from tests.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (stream, _) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Connect, retrying until success or `timeout` elapses. Covers the short
    /// window where a freshly spawned server is not accepting yet.
    pub async fn connect_retry(url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    /// Next frame, or `None` once the stream ends. Errors on timeout.
    pub async fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Message>, ClientError> {
        let next = tokio::time::timeout(timeout, self.stream.next())
            .await
            .map_err(|_| "timeout waiting for message")?;
        Ok(next.transpose()?)
    }

    pub async fn send_text(&mut self, text: &str) -> Result<(), ClientError> {
        self.stream.send(Message::text(text.to_string())).await?;
        Ok(())
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), ClientError> {
        self.send_text(&value.to_string()).await
    }

    pub async fn send_binary(&mut self, data: Vec<u8>) -> Result<(), ClientError> {
        self.stream.send(Message::binary(data)).await?;
        Ok(())
    }

    pub async fn close(&mut self) -> Result<(), ClientError> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Next JSON text frame. Control frames are skipped; `None` on close.
    pub async fn recv_json_timeout(&mut self, timeout: Duration) -> Result<Option<Value>, ClientError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            match self.recv_timeout(remaining).await? {
                Some(Message::Text(text)) => return Ok(Some(serde_json::from_str(text.as_str())?)),
                Some(Message::Ping(_)) | Some(Message::Pong(_)) => continue,
                Some(Message::Close(_)) | None => return Ok(None),
                Some(other) => return Err(format!("unexpected frame: {other:?}").into()),
            }
        }
    }

    /// Read JSON frames until one with `"type": msg_type` arrives. Frames of
    /// other types are dropped.
    pub async fn recv_until_type(&mut self, msg_type: &str, timeout: Duration) -> Result<Value, ClientError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            match self.recv_json_timeout(remaining).await? {
                Some(value) if value["type"] == msg_type => return Ok(value),
                Some(_) => continue,
                None => return Err(format!("connection closed before '{msg_type}'").into()),
            }
        }
    }

    /// True if the server closes the connection (or the stream ends) within `timeout`.
    pub async fn closed_within(&mut self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            match tokio::time::timeout(remaining, self.stream.next()).await {
                Err(_) => return false,
                Ok(None) | Ok(Some(Err(_))) | Ok(Some(Ok(Message::Close(_)))) => return true,
                Ok(Some(Ok(_))) => continue,
            }
        }
    }
}
