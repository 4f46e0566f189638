use thiserror::Error;

/// Failures surfaced by the relay operations.
///
/// Live-channel transport failures are deliberately absent: a failed
/// push never propagates past `send` — it only evicts the stale
/// registry entry.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Malformed request, rejected before any side effect.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The history store is unreachable or rejected the operation.
    #[error("history store failure: {0}")]
    Storage(#[from] anyhow::Error),
}
