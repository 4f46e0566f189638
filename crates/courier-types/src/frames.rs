use serde::{Deserialize, Serialize};

use crate::models::Message;

/// Frames pushed server-to-client over a live channel.
///
/// Only two frame types exist: a pong echoing an inbound liveness ping,
/// and a new-message notification pushed when a relayed message names
/// this channel's identity as the receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelFrame {
    Pong { data: String },
    NewMessage { message: Message },
}
