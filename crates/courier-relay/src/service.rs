use std::sync::Arc;

use chrono::SecondsFormat;
use tracing::{debug, warn};
use uuid::Uuid;

use courier_db::Database;
use courier_db::models::MessageRow;
use courier_types::frames::ChannelFrame;
use courier_types::models::Message;

use crate::error::RelayError;
use crate::registry::Registry;

/// Upper bound on a single history fetch.
const HISTORY_FETCH_LIMIT: u32 = 1000;

/// Orchestrates the two relay operations: persist-then-push and
/// history fetch.
#[derive(Clone)]
pub struct RelayService {
    db: Arc<Database>,
    registry: Registry,
}

impl RelayService {
    pub fn new(db: Arc<Database>, registry: Registry) -> Self {
        Self { db, registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Persist a message, then attempt best-effort live delivery.
    ///
    /// Persistence is the completion contract: a storage failure fails
    /// the whole operation and no push is attempted. A failed push only
    /// evicts the receiver's stale registry entry — the caller still
    /// gets the persisted message back.
    pub async fn send(
        &self,
        sender: &str,
        receiver: &str,
        encrypted_content: String,
    ) -> Result<Message, RelayError> {
        if sender.is_empty() {
            return Err(RelayError::Validation("sender must not be empty".into()));
        }
        if receiver.is_empty() {
            return Err(RelayError::Validation("receiver must not be empty".into()));
        }

        let message = Message::new(sender.to_string(), receiver.to_string(), encrypted_content);

        // Run the blocking insert off the async runtime
        let db = self.db.clone();
        let row = message.clone();
        tokio::task::spawn_blocking(move || {
            db.insert_message(
                &row.id.to_string(),
                &row.sender,
                &row.receiver,
                &row.encrypted_content,
                &row.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            )
        })
        .await
        .map_err(|e| RelayError::Storage(anyhow::anyhow!("insert task panicked: {e}")))??;

        if let Some((conn_id, tx)) = self.registry.lookup(receiver).await {
            let frame = ChannelFrame::NewMessage {
                message: message.clone(),
            };
            if tx.send(frame).is_err() {
                // Dead channel: clean it up, but the send already
                // succeeded on persistence.
                warn!("live push to {} failed, dropping stale channel", receiver);
                self.registry.unregister(receiver, conn_id).await;
            } else {
                debug!("pushed message {} to {}", message.id, receiver);
            }
        }

        Ok(message)
    }

    /// All messages where `identity` is sender or receiver, oldest
    /// first, capped at `HISTORY_FETCH_LIMIT`.
    pub async fn fetch(&self, identity: &str) -> Result<Vec<Message>, RelayError> {
        let db = self.db.clone();
        let identity = identity.to_string();
        let rows = tokio::task::spawn_blocking(move || {
            db.get_messages_for(&identity, HISTORY_FETCH_LIMIT)
        })
        .await
        .map_err(|e| RelayError::Storage(anyhow::anyhow!("fetch task panicked: {e}")))??;

        Ok(rows.into_iter().map(row_to_message).collect())
    }
}

fn row_to_message(row: MessageRow) -> Message {
    Message {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt message id '{}': {}", row.id, e);
            Uuid::default()
        }),
        sender: row.sender,
        receiver: row.receiver,
        encrypted_content: row.encrypted_content,
        timestamp: row
            .created_at
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap_or_else(|e| {
                warn!("Corrupt created_at '{}' on message '{}': {}", row.created_at, row.id, e);
                chrono::DateTime::default()
            }),
    }
}
