//! Route handlers for the OAuth connection lifecycle.
//!
//! All handlers receive `SharedState` via axum state extraction and convert
//! every failure into a structured JSON response through `AuthError`.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::error::AuthError;
use crate::providers::{Provider, TokenSet};
use crate::store::TokenRecord;
use crate::SharedState;

/// Error string the status endpoint reports for an expired token.
pub const EXPIRED_MESSAGE: &str = "Token expired. Please reconnect.";

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/status", get(health))
        .route("/auth/providers", get(list_providers))
        .route("/auth/{provider}/login", get(login))
        .route("/auth/{provider}/callback", get(callback))
        .route(
            "/auth/{provider}/status",
            get(connection_status).delete(disconnect),
        )
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "social-auth",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /auth/providers — list the provider IDs this build ships.
async fn list_providers(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let mut providers = state.registry.list();
    providers.sort_unstable();
    Json(json!({ "providers": providers }))
}

fn lookup<'a>(state: &'a SharedState, provider_id: &str) -> Result<&'a Provider, AuthError> {
    state
        .registry
        .get(provider_id)
        .ok_or_else(|| AuthError::ProviderNotFound(provider_id.to_string()))
}

// ── Login ───────────────────────────────────────────────────────────────

/// GET /auth/{provider}/login — redirect to the provider's consent screen.
///
/// Writes nothing; the token store is only touched by the callback. With
/// credentials unconfigured this fails before any redirect is attempted.
async fn login(
    State(state): State<SharedState>,
    Path(provider_id): Path<String>,
) -> Result<Redirect, AuthError> {
    let provider = lookup(&state, &provider_id)?;
    let creds = state
        .config
        .credentials(&provider_id)
        .ok_or_else(|| provider.descriptor().missing_credentials())?;

    let url = provider.auth_url(creds, &state.config.callback_url(&provider_id));
    info!(provider = %provider_id, "redirecting to provider authorization");
    Ok(Redirect::temporary(&url))
}

// ── Callback ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET /auth/{provider}/callback — exchange the code, persist the record,
/// send the browser back to the app.
async fn callback(
    State(state): State<SharedState>,
    Path(provider_id): Path<String>,
    Query(q): Query<CallbackQuery>,
) -> Result<Redirect, AuthError> {
    let provider = lookup(&state, &provider_id)?;

    if let Some(err) = q.error {
        let detail = q.error_description.unwrap_or(err);
        return Err(AuthError::BadRequest(format!(
            "Authorization was not granted: {detail}"
        )));
    }
    let code = q
        .code
        .ok_or_else(|| AuthError::BadRequest("Missing authorization code".into()))?;

    let creds = state
        .config
        .credentials(&provider_id)
        .ok_or_else(|| provider.descriptor().missing_credentials())?;

    let tokens = provider
        .exchange_code(creds, &code, &state.config.callback_url(&provider_id))
        .await?;

    let record = record_from_tokens(tokens, Utc::now().timestamp_millis());
    state.store.set(&provider_id, &record)?;
    info!(provider = %provider_id, "connection stored");

    let target = format!("{}?connected={}", state.config.app_url, provider_id);
    Ok(Redirect::temporary(&target))
}

/// Pin a provider token response to the wall clock: a relative `expires_in`
/// in seconds becomes an absolute `expires_at` in epoch milliseconds.
/// `expires_in` crosses a trust boundary, so the arithmetic saturates
/// instead of overflowing on a nonsense value.
fn record_from_tokens(tokens: TokenSet, now_ms: i64) -> TokenRecord {
    let expires_at = tokens.expires_in.map(|secs| {
        let millis = i64::try_from(secs)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);
        now_ms.saturating_add(millis)
    });

    TokenRecord {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_at,
        username: None,
        account_id: None,
    }
}

// ── Status ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionStatus {
    fn disconnected() -> Self {
        Self {
            connected: false,
            username: None,
            account_id: None,
            error: None,
        }
    }

    fn expired() -> Self {
        Self {
            error: Some(EXPIRED_MESSAGE.into()),
            ..Self::disconnected()
        }
    }

    fn connected(username: String, account_id: Option<String>) -> Self {
        Self {
            connected: true,
            username: Some(username),
            account_id,
            error: None,
        }
    }
}

/// GET /auth/{provider}/status — report the stored connection state.
///
/// Served purely from the token store; no call to the provider is made to
/// verify the token. A possibly stale "connected" beats burning provider API
/// quota on every poll, so a token revoked out-of-band keeps reporting
/// connected until the next write.
async fn connection_status(
    State(state): State<SharedState>,
    Path(provider_id): Path<String>,
) -> Result<Json<ConnectionStatus>, AuthError> {
    let provider = lookup(&state, &provider_id)?;

    let status = match state.store.get(&provider_id)? {
        None => ConnectionStatus::disconnected(),
        Some(record) if record.is_expired() => ConnectionStatus::expired(),
        Some(record) => {
            let username = record
                .username
                .unwrap_or_else(|| provider.descriptor().default_username.to_string());
            ConnectionStatus::connected(username, record.account_id)
        }
    };

    Ok(Json(status))
}

// ── Disconnect ──────────────────────────────────────────────────────────

/// DELETE /auth/{provider}/status — drop the stored record. Idempotent:
/// disconnecting an absent connection still acknowledges success.
async fn disconnect(
    State(state): State<SharedState>,
    Path(provider_id): Path<String>,
) -> Result<Json<serde_json::Value>, AuthError> {
    lookup(&state, &provider_id)?;
    state.store.delete(&provider_id)?;
    info!(provider = %provider_id, "disconnected");
    Ok(Json(json!({ "success": true })))
}
