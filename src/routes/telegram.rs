//! Webhook receiving updates from the Telegram Bot API.

use axum::{extract::State, http::HeaderMap, Json};
use serde_json::{json, Value};
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::middleware::json::JsonBody;
use crate::models::telegram::Update;
use crate::services::bot;
use crate::AppState;

pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// POST /telegram/webhook
///
/// Answers 200 even when the reply could not be delivered, otherwise the bot
/// API keeps redelivering the same update.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(update): JsonBody<Update>,
) -> Result<Json<Value>, AppError> {
    if let Some(expected) = &state.config.telegram_webhook_secret {
        let given = headers.get(SECRET_HEADER).map(|v| v.as_bytes());
        if !secret_matches(given, expected) {
            tracing::warn!(update_id = update.update_id, "Webhook secret mismatch");
            return Err(AppError::Unauthorized);
        }
    }

    match bot::handle_update(state.notifier.as_ref(), &update).await {
        Ok(Some(command)) => tracing::debug!(update_id = update.update_id, ?command, "Handled bot command"),
        Ok(None) => {}
        Err(e) => tracing::warn!(update_id = update.update_id, error = %e, "Bot reply failed"),
    }

    Ok(Json(json!({ "ok": true })))
}

fn secret_matches(given: Option<&[u8]>, expected: &str) -> bool {
    given.is_some_and(|given| bool::from(given.ct_eq(expected.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_must_match_exactly() {
        assert!(secret_matches(Some("s3cret".as_bytes()), "s3cret"));
        assert!(!secret_matches(Some("s3cre".as_bytes()), "s3cret"));
        assert!(!secret_matches(Some("s3cret!".as_bytes()), "s3cret"));
        assert!(!secret_matches(Some("".as_bytes()), "s3cret"));
        assert!(!secret_matches(None, "s3cret"));
    }
}
