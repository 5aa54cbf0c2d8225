use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error type for the social-auth service.
///
/// An expired stored token is deliberately NOT a variant here: the status
/// endpoint reports expiry as a normal payload, since it is an expected,
/// user-actionable state rather than a fault.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Required client credentials are not configured for a provider.
    /// The message names the env vars to set.
    #[error("{provider} is not configured. Set {id_var} and {secret_var} in the environment.")]
    MissingCredentials {
        provider: String,
        id_var: &'static str,
        secret_var: &'static str,
    },

    #[error("Unknown provider: {0}")]
    ProviderNotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upstream provider/network failure. Not retried; the underlying
    /// message is passed through where safe to expose.
    #[error("OAuth provider error: {0}")]
    Provider(String),

    #[error("Token store error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for AuthError {
    fn from(e: std::io::Error) -> Self {
        AuthError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Storage(e.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::MissingCredentials { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::ProviderNotFound(_) => StatusCode::NOT_FOUND,
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::Provider(_) => StatusCode::BAD_GATEWAY,
            AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({ "error": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_message_names_the_env_vars() {
        let err = AuthError::MissingCredentials {
            provider: "Instagram".into(),
            id_var: "INSTAGRAM_CLIENT_ID",
            secret_var: "INSTAGRAM_CLIENT_SECRET",
        };
        let msg = err.to_string();
        assert!(msg.contains("INSTAGRAM_CLIENT_ID"));
        assert!(msg.contains("INSTAGRAM_CLIENT_SECRET"));
    }
}
