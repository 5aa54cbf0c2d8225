use serde::Deserialize;

use crate::error::AuthError;

/// Static description of an OAuth provider: endpoints, scope list, and the
/// env vars its client credentials are read from. One generic flow runs over
/// these descriptors instead of per-provider handler code.
#[derive(Debug, Clone, Copy)]
pub struct ProviderDescriptor {
    /// Path segment and store key, e.g. "instagram".
    pub id: &'static str,
    /// Human-readable name, e.g. "Instagram".
    pub display_name: &'static str,
    /// Shown by the status endpoint when no username was stored.
    pub default_username: &'static str,
    pub client_id_var: &'static str,
    pub client_secret_var: &'static str,
    pub authorize_url: &'static str,
    pub token_url: &'static str,
    pub scopes: &'static [&'static str],
    /// Meta joins scopes with ",", Google with " ".
    pub scope_separator: &'static str,
    /// Extra authorize params, e.g. forced re-consent flags for providers
    /// that would otherwise silently reuse a prior grant.
    pub extra_auth_params: &'static [(&'static str, &'static str)],
}

impl ProviderDescriptor {
    /// Error for a login/callback attempt on an unconfigured provider,
    /// naming the env vars the operator has to set.
    pub fn missing_credentials(&self) -> AuthError {
        AuthError::MissingCredentials {
            provider: self.display_name.to_string(),
            id_var: self.client_id_var,
            secret_var: self.client_secret_var,
        }
    }
}

/// Client credentials resolved from the environment for one provider.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Token response from a provider's token endpoint after code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime in seconds, when the provider reports one.
    pub expires_in: Option<u64>,
}

/// A registered provider: its descriptor plus an HTTP client for the
/// code-exchange call.
pub struct Provider {
    descriptor: ProviderDescriptor,
    http: reqwest::Client,
}

impl Provider {
    pub fn new(descriptor: ProviderDescriptor) -> Self {
        Self {
            descriptor,
            http: reqwest::Client::new(),
        }
    }

    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    /// Build the authorization URL the browser is redirected to.
    ///
    /// Always requests an authorization code; descriptor extras are appended
    /// last so providers that need a re-consent flag get it on every login.
    pub fn auth_url(&self, creds: &ProviderCredentials, redirect_uri: &str) -> String {
        let scope = self.descriptor.scopes.join(self.descriptor.scope_separator);

        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("client_id", &creds.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &scope);
        for (key, value) in self.descriptor.extra_auth_params {
            query.append_pair(key, value);
        }

        format!("{}?{}", self.descriptor.authorize_url, query.finish())
    }

    /// Exchange an authorization code for a token set at the descriptor's
    /// token endpoint. Upstream failures are surfaced as-is; no retries.
    pub async fn exchange_code(
        &self,
        creds: &ProviderCredentials,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenSet, AuthError> {
        let resp = self
            .http
            .post(self.descriptor.token_url)
            .form(&[
                ("code", code),
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("Token exchange request failed: {e}")))?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::Provider(format!(
                "{} token exchange failed: {body}",
                self.descriptor.display_name
            )));
        }

        resp.json()
            .await
            .map_err(|e| AuthError::Provider(format!("Failed to parse token response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{INSTAGRAM, YOUTUBE};

    fn test_creds() -> ProviderCredentials {
        ProviderCredentials {
            client_id: "app-123".into(),
            client_secret: "shh".into(),
        }
    }

    #[test]
    fn auth_url_requests_a_code_with_encoded_params() {
        let provider = Provider::new(INSTAGRAM);
        let url = provider.auth_url(&test_creds(), "http://localhost:8420/auth/instagram/callback");

        assert!(url.starts_with(INSTAGRAM.authorize_url));
        assert!(url.contains("client_id=app-123"));
        assert!(url.contains("response_type=code"));
        // redirect_uri must be percent-encoded
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8420%2Fauth%2Finstagram%2Fcallback"));
        // client secret never appears in the authorize URL
        assert!(!url.contains("shh"));
    }

    #[test]
    fn instagram_forces_reconsent() {
        let provider = Provider::new(INSTAGRAM);
        let url = provider.auth_url(&test_creds(), "http://localhost/cb");
        assert!(url.contains("auth_type=rerequest"));
    }

    #[test]
    fn youtube_requests_offline_access_with_consent_prompt() {
        let provider = Provider::new(YOUTUBE);
        let url = provider.auth_url(&test_creds(), "http://localhost/cb");
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        // Google scopes are space-separated, which encodes as '+'
        assert!(url.contains("youtube.upload+https"));
    }

    #[test]
    fn missing_credentials_error_points_at_the_env_vars() {
        let err = YOUTUBE.missing_credentials();
        let msg = err.to_string();
        assert!(msg.contains("YOUTUBE_CLIENT_ID"));
        assert!(msg.contains("YOUTUBE_CLIENT_SECRET"));
    }
}
