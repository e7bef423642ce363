//! Logging helpers for session transitions.
//!
//! Structured logging via `tracing` when the `tracing` feature is enabled,
//! plain stderr otherwise.

use crate::generator::GenerationError;

/// Log the start of a new session.
pub fn log_session_started(topic: &str) {
    #[cfg(feature = "tracing")]
    tracing::info!(topic = topic, "Session started");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[INFO] Session started: {}", topic);
}

/// Log a completed round.
pub fn log_round_completed(round: u32, card_id: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(round = round, card_id = card_id, "Round completed");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] Round {} completed: {}", round, card_id);
}

/// Log a failed generator call (`operation` names the request kind).
pub fn log_generation_failed(operation: &str, error: &GenerationError) {
    #[cfg(feature = "tracing")]
    tracing::warn!(operation = operation, ?error, "Generation failed");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[WARN] Generation failed ({}): {}", operation, error);
}

/// Log a response discarded because the session was reset in the interim.
pub fn log_stale_response(operation: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(operation = operation, "Stale response discarded");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] Stale response discarded: {}", operation);
}

/// Log a session reset.
pub fn log_session_reset() {
    #[cfg(feature = "tracing")]
    tracing::info!("Session reset");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[INFO] Session reset");
}
