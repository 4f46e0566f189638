use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tracing::{info, warn};

use courier_types::frames::ChannelFrame;

use crate::registry::Registry;

/// Drive a single live channel from accept to teardown.
///
/// The handler registers the identity, then loops over two sources:
/// frames queued by the relay's send path (written out as JSON text) and
/// inbound frames from the peer. Any inbound text is echoed back as a
/// pong — the inbound direction is a liveness check only, never a
/// message-submission path. Peer close or any transport error ends the
/// loop, and the identity is unregistered on the way out.
pub async fn handle_channel(socket: WebSocket, registry: Registry, identity: String) {
    let (mut sender, mut receiver) = socket.split();

    let (conn_id, mut frames_rx) = registry.register(&identity).await;
    info!("{} opened a live channel", identity);

    loop {
        tokio::select! {
            pushed = frames_rx.recv() => {
                // None means this registration was superseded and the
                // send half dropped; treat it like a close.
                let Some(frame) = pushed else { break };
                let text = serde_json::to_string(&frame).unwrap();
                if sender.send(WsMessage::Text(text.into())).await.is_err() {
                    break;
                }
            }
            inbound = receiver.next() => {
                match inbound {
                    Some(Ok(WsMessage::Text(text))) => {
                        let pong = ChannelFrame::Pong { data: text.to_string() };
                        let text = serde_json::to_string(&pong).unwrap();
                        if sender.send(WsMessage::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    // Control frames carry no liveness semantics here
                    Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Binary(_))) => {}
                    Some(Ok(WsMessage::Close(_))) | None => break,
                    Some(Err(e)) => {
                        warn!("{} channel read error: {}", identity, e);
                        break;
                    }
                }
            }
        }
    }

    registry.unregister(&identity, conn_id).await;
    info!("{} live channel closed", identity);
}
