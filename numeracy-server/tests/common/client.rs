//! WebSocket test client for protocol testing
//!
//! Provides both low-level WsConnection and high-level TestClient.
//!
//! Note: Some methods may appear unused because they're only used in specific
//! test files and clippy checks each test independently.

use std::net::SocketAddr;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::{Serialize, de::DeserializeOwned};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Low-level WebSocket connection
pub struct WsConnection {
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
}

impl WsConnection {
    /// Connect to the WebSocket endpoint with an optional query string
    pub async fn connect(addr: SocketAddr, query: Option<&str>) -> Self {
        let url = match query {
            Some(query) => format!("ws://{}/ws?{}", addr, query),
            None => format!("ws://{}/ws", addr),
        };
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .expect("Failed to connect");
        let (sink, stream) = ws.split();
        Self { sink, stream }
    }

    /// Send raw text message
    pub async fn send_raw(&mut self, msg: &str) {
        self.sink
            .send(Message::Text(msg.to_string().into()))
            .await
            .unwrap();
    }

    /// Send binary frame
    pub async fn send_binary(&mut self, data: &[u8]) {
        self.sink
            .send(Message::Binary(data.to_vec().into()))
            .await
            .unwrap();
    }

    /// Send JSON message
    pub async fn send_json<T: Serialize>(&mut self, msg: &T) {
        let json = serde_json::to_string(msg).unwrap();
        self.send_raw(&json).await;
    }

    /// Receive raw text message
    pub async fn recv_raw(&mut self) -> String {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return text.to_string(),
                Some(Ok(Message::Ping(_))) => continue,
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("WebSocket error: {}", e),
                None => panic!("WebSocket closed"),
            }
        }
    }

    /// Receive and deserialize JSON message
    pub async fn recv_json<T: DeserializeOwned>(&mut self) -> T {
        let text = self.recv_raw().await;
        serde_json::from_str(&text).expect("Failed to parse JSON")
    }

    /// Receive with timeout, returns None if timeout
    pub async fn recv_timeout(&mut self, duration: Duration) -> Option<String> {
        tokio::time::timeout(duration, self.recv_raw()).await.ok()
    }

    /// Close the connection from the client side
    pub async fn close(mut self) {
        let _ = self.sink.send(Message::Close(None)).await;
    }
}

/// High-level test client speaking the session protocol for one task
pub struct TestClient {
    pub conn: WsConnection,
    pub task_id: String,
}

impl TestClient {
    /// Connect and bind to `task_id`, consuming the opening task_prompt
    #[allow(dead_code)]
    pub async fn open(addr: SocketAddr, task_id: &str) -> (Self, serde_json::Value) {
        let mut conn = WsConnection::connect(addr, Some(&format!("task_id={}", task_id))).await;

        let prompt: serde_json::Value = conn.recv_json().await;
        assert_eq!(
            prompt["type"], "task_prompt",
            "Expected task_prompt on connect but got: {}",
            prompt
        );

        let client = Self {
            conn,
            task_id: task_id.to_string(),
        };
        (client, prompt)
    }

    /// Connect without binding; the first message binds the session
    #[allow(dead_code)]
    pub async fn connect_unbound(addr: SocketAddr, task_id: &str) -> Self {
        Self {
            conn: WsConnection::connect(addr, None).await,
            task_id: task_id.to_string(),
        }
    }

    #[allow(dead_code)]
    pub async fn draw_stroke(&mut self, stroke_data: &[f64]) {
        self.conn
            .send_json(&serde_json::json!({
                "type": "draw_stroke",
                "task_id": self.task_id,
                "stroke_data": stroke_data,
            }))
            .await;
    }

    #[allow(dead_code)]
    pub async fn action_complete(&mut self) {
        self.conn
            .send_json(&serde_json::json!({
                "type": "action_complete",
                "task_id": self.task_id,
            }))
            .await;
    }

    #[allow(dead_code)]
    pub async fn submit_text(&mut self, text: &str) {
        self.conn
            .send_json(&serde_json::json!({
                "type": "submit_text_response",
                "task_id": self.task_id,
                "text": text,
            }))
            .await;
    }

    /// Receive next message
    #[allow(dead_code)]
    pub async fn recv(&mut self) -> serde_json::Value {
        self.conn.recv_json().await
    }

    /// Assert no message received within duration
    #[allow(dead_code)]
    pub async fn expect_no_message(&mut self, duration: Duration) {
        assert!(
            self.conn.recv_timeout(duration).await.is_none(),
            "Expected no message but received one"
        );
    }
}
