use axum::{Json, extract::State, http::StatusCode};
use chrono::{SecondsFormat, Utc};
use tracing::{error, info};
use uuid::Uuid;

use courier_types::api::{LoginRequest, LoginResponse};

use crate::AppState;

/// Static shared-secret table: password -> identity.
const CREDENTIALS: &[(&str, &str)] = &[
    ("alphabravocharlie", "Alpha"),
    ("bravoalphacharlie", "Bravo"),
];

fn resolve_identity(password: &str) -> Option<&'static str> {
    CREDENTIALS
        .iter()
        .find(|(secret, _)| *secret == password)
        .map(|(_, identity)| *identity)
}

/// Resolve a shared secret to an identity.
///
/// An unrecognized credential is a well-formed `success=false` response,
/// never an error status — callers must be able to tell a bad password
/// apart from a server fault.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let Some(identity) = resolve_identity(&req.password) else {
        return Ok(Json(LoginResponse {
            success: false,
            user: None,
            token: None,
            message: "Invalid password".into(),
        }));
    };

    // First login creates the user record; later logins find it.
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || {
        if db.get_user_by_username(identity)?.is_none() {
            db.create_user(
                &Uuid::new_v4().to_string(),
                identity,
                &Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            )?;
        }
        anyhow::Ok(())
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|e| {
        error!("user bookkeeping failed for {}: {}", identity, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("{} logged in", identity);

    // Tokens are minted per login but nothing in the relay consumes them.
    Ok(Json(LoginResponse {
        success: true,
        user: Some(identity.to_string()),
        token: Some(Uuid::new_v4().to_string()),
        message: format!("Welcome {identity}!"),
    }))
}
