use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A relayed message. The server stores and forwards `encrypted_content`
/// without ever interpreting it — clients encrypt before sending.
/// Once persisted a message is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: String,
    pub receiver: String,
    pub encrypted_content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a fresh message with a server-assigned id and timestamp.
    pub fn new(sender: String, receiver: String, encrypted_content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            receiver,
            encrypted_content,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
