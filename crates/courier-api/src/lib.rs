pub mod auth;
pub mod messages;

use std::sync::Arc;

use axum::Json;
use serde_json::{Value, json};

use courier_db::Database;
use courier_relay::RelayService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub relay: RelayService,
}

/// Health check.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Encrypted Messenger API" }))
}
