use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use courier_types::frames::ChannelFrame;

/// Process-wide map from user identity to its single live channel.
///
/// At most one entry exists per identity: a new registration supersedes
/// any previous one, and the superseded handler's late cleanup is a
/// no-op because `unregister` is guarded by the per-registration
/// connection id.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    /// identity -> (conn_id, sender half of the channel's frame queue)
    channels: RwLock<HashMap<String, (Uuid, mpsc::UnboundedSender<ChannelFrame>)>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the live channel for `identity`.
    /// Returns the connection id and the receiver half the channel
    /// handler drains. A replaced channel is abandoned, not closed —
    /// its handler detects closure on its own.
    pub async fn register(
        &self,
        identity: &str,
    ) -> (Uuid, mpsc::UnboundedReceiver<ChannelFrame>) {
        let conn_id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner
            .channels
            .write()
            .await
            .insert(identity.to_string(), (conn_id, tx));
        (conn_id, rx)
    }

    /// The live channel for `identity`, if one is registered.
    pub async fn lookup(
        &self,
        identity: &str,
    ) -> Option<(Uuid, mpsc::UnboundedSender<ChannelFrame>)> {
        self.inner.channels.read().await.get(identity).cloned()
    }

    /// Remove the entry for `identity`, but only if `conn_id` still owns
    /// it. Removing an absent or superseded entry is a no-op.
    pub async fn unregister(&self, identity: &str, conn_id: Uuid) {
        let mut channels = self.inner.channels.write().await;
        if let Some((stored_conn_id, _)) = channels.get(identity) {
            if *stored_conn_id == conn_id {
                channels.remove(identity);
            }
        }
    }

    /// Registered-channel count, for test assertions.
    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.inner.channels.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_types::models::Message;

    #[tokio::test]
    async fn lookup_absent_identity_is_none() {
        let registry = Registry::new();
        assert!(registry.lookup("Alpha").await.is_none());
    }

    #[tokio::test]
    async fn register_then_lookup_delivers_frames() {
        let registry = Registry::new();
        let (_conn_id, mut rx) = registry.register("Alpha").await;

        let (_, tx) = registry.lookup("Alpha").await.unwrap();
        let msg = Message::new("Bravo".into(), "Alpha".into(), "x".into());
        tx.send(ChannelFrame::NewMessage { message: msg.clone() }).unwrap();

        match rx.recv().await.unwrap() {
            ChannelFrame::NewMessage { message } => assert_eq!(message.id, msg.id),
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[tokio::test]
    async fn second_registration_supersedes_first() {
        let registry = Registry::new();
        let (first_conn, _first_rx) = registry.register("Alpha").await;
        let (second_conn, mut second_rx) = registry.register("Alpha").await;

        assert_eq!(registry.len().await, 1);

        let (looked_up_conn, tx) = registry.lookup("Alpha").await.unwrap();
        assert_eq!(looked_up_conn, second_conn);

        tx.send(ChannelFrame::Pong { data: "hi".into() }).unwrap();
        assert!(matches!(
            second_rx.recv().await,
            Some(ChannelFrame::Pong { .. })
        ));

        // The superseded handler's cleanup must not evict the new channel.
        registry.unregister("Alpha", first_conn).await;
        assert!(registry.lookup("Alpha").await.is_some());

        registry.unregister("Alpha", second_conn).await;
        assert!(registry.lookup("Alpha").await.is_none());
    }

    #[tokio::test]
    async fn unregister_absent_identity_is_noop() {
        let registry = Registry::new();
        registry.unregister("Nobody", Uuid::new_v4()).await;
        assert_eq!(registry.len().await, 0);
    }
}
