use crate::error::ProtocolError;
use crate::relay::SignalingRelay;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use greenroom_core::ClientEvent;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(relay): State<SignalingRelay>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, relay))
}

async fn handle_socket(socket: WebSocket, relay: SignalingRelay) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let connection_id = relay.registry().admit(tx);
    info!(%connection_id, "websocket connected");

    // Writer task: the only place this connection's frames are
    // written, so no registry or directory lock is ever held across a
    // transport write.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sink.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => error!(%connection_id, "failed to serialize server event: {e}"),
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let relay = relay.clone();

        async move {
            while let Some(Ok(msg)) = stream.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => relay.handle_event(connection_id, event),
                        Err(e) => relay.reject(connection_id, ProtocolError::Invalid(e)),
                    },
                    Message::Binary(_) => {
                        warn!(%connection_id, "binary frame ignored");
                        relay.reject(connection_id, ProtocolError::UnsupportedType);
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    relay.handle_disconnect(connection_id);
    info!(%connection_id, "websocket disconnected");
}
