//! Real-time notification endpoint.
//!
//! Each accepted connection is registered with the
//! [`SubscriberRegistry`](crate::notify::SubscriberRegistry) so upload
//! notifications reach it, and runs a receive loop that echoes text
//! frames back to the sender. The connection is unregistered only when
//! its own receive loop observes a close frame or an error.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::SinkExt;
use futures::stream::{SplitSink, StreamExt};
use tokio::sync::Mutex;
use tracing::debug;

use drivenest_core::PushEvent;

use crate::notify::{PushChannel, PushError, SubscriberRegistry};

use super::AppState;

/// The send half of one WebSocket connection, shared between the
/// broadcast path and the connection's own echo replies.
struct WsChannel {
    sink: Mutex<SplitSink<WebSocket, Message>>,
}

#[async_trait]
impl PushChannel for WsChannel {
    async fn push(&self, event: &PushEvent) -> Result<(), PushError> {
        let json = serde_json::to_string(event).map_err(|e| PushError(e.to_string()))?;
        self.sink
            .lock()
            .await
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| PushError(e.to_string()))
    }
}

/// `GET /ws` -- upgrade to a WebSocket and join the subscriber set.
#[allow(clippy::unused_async)]
pub async fn ws(State(state): State<AppState>, upgrade: WebSocketUpgrade) -> Response {
    upgrade.on_upgrade(move |socket| handle_socket(socket, Arc::clone(&state.registry)))
}

async fn handle_socket(socket: WebSocket, registry: Arc<SubscriberRegistry>) {
    let (sink, mut stream) = socket.split();
    let channel = Arc::new(WsChannel {
        sink: Mutex::new(sink),
    });

    let id = registry
        .register(Arc::clone(&channel) as Arc<dyn PushChannel>)
        .await;
    debug!(subscriber = id, "websocket client connected");

    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => {
                if channel.push(&PushEvent::echo(text.as_str())).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) | Err(_) => break,
            // Ping/pong is answered by axum; binary frames are ignored.
            Ok(_) => {}
        }
    }

    registry.unregister(id).await;
    debug!(subscriber = id, "websocket client disconnected");
}
