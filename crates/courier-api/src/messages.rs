use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::error;

use courier_relay::RelayError;
use courier_types::api::SendMessageRequest;
use courier_types::models::Message;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SenderQuery {
    /// Caller-supplied session identity; the relay does not verify it.
    pub sender: String,
}

pub async fn send_message(
    State(state): State<AppState>,
    Query(query): Query<SenderQuery>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<Message>, StatusCode> {
    let message = state
        .relay
        .send(&query.sender, &req.receiver, req.encrypted_content)
        .await
        .map_err(relay_error_status)?;

    Ok(Json(message))
}

pub async fn get_messages(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    let history = state.relay.fetch(&user).await.map_err(relay_error_status)?;
    Ok(Json(history))
}

fn relay_error_status(err: RelayError) -> StatusCode {
    match err {
        RelayError::Validation(reason) => {
            error!("rejected request: {}", reason);
            StatusCode::BAD_REQUEST
        }
        RelayError::Storage(e) => {
            error!("history store failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppStateInner;
    use courier_db::Database;
    use courier_relay::{Registry, RelayService};
    use std::sync::Arc;

    fn state() -> AppState {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let relay = RelayService::new(db.clone(), Registry::new());
        Arc::new(AppStateInner { db, relay })
    }

    #[tokio::test]
    async fn send_then_fetch_roundtrip() {
        let state = state();

        let Json(sent) = send_message(
            State(state.clone()),
            Query(SenderQuery { sender: "Alpha".into() }),
            Json(SendMessageRequest {
                receiver: "Bravo".into(),
                encrypted_content: "CIPHERTEXT_1".into(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(sent.sender, "Alpha");
        assert_eq!(sent.receiver, "Bravo");
        assert_eq!(sent.encrypted_content, "CIPHERTEXT_1");

        let Json(history) = get_messages(State(state), Path("Bravo".into()))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, sent.id);
    }

    #[tokio::test]
    async fn empty_sender_is_bad_request() {
        let state = state();
        let result = send_message(
            State(state),
            Query(SenderQuery { sender: "".into() }),
            Json(SendMessageRequest {
                receiver: "Bravo".into(),
                encrypted_content: "x".into(),
            }),
        )
        .await;
        assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fetch_unknown_identity_is_empty_not_error() {
        let state = state();
        let Json(history) = get_messages(State(state), Path("Nobody".into()))
            .await
            .unwrap();
        assert!(history.is_empty());
    }
}
