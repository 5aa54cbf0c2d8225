use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::providers::{ProviderCredentials, ProviderDescriptor, DEFAULT_PROVIDERS};

/// Application configuration, loaded once from environment variables and
/// injected into handlers through shared state. Handlers never read the
/// process environment themselves.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Public base URL of this service; callback redirect URIs hang off it.
    pub base_url: String,
    /// Frontend URL users land on after a completed OAuth callback.
    pub app_url: String,
    /// Path of the JSON token file.
    pub token_file: PathBuf,
    /// Client credentials per provider ID. A provider without an entry is
    /// still routable, but login fails with a configuration error.
    pub credentials: HashMap<&'static str, ProviderCredentials>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(DEFAULT_PROVIDERS)
    }

    /// Load config, resolving credentials for the given descriptors from the
    /// env vars each descriptor declares. Missing credentials are not a
    /// startup failure; the affected provider reports them at login time.
    pub fn from_env_with(providers: &[ProviderDescriptor]) -> Result<Self> {
        let mut credentials = HashMap::new();
        for descriptor in providers {
            let id = std::env::var(descriptor.client_id_var).ok();
            let secret = std::env::var(descriptor.client_secret_var).ok();
            if let (Some(client_id), Some(client_secret)) = (id, secret) {
                credentials.insert(
                    descriptor.id,
                    ProviderCredentials {
                        client_id,
                        client_secret,
                    },
                );
            }
        }

        Ok(Config {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8420".into())
                .parse()
                .context("Invalid PORT")?,
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8420".into()),
            app_url: std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".into()),
            token_file: std::env::var("TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/tokens.json")),
            credentials,
        })
    }

    /// Get the client credentials for a provider, if configured.
    pub fn credentials(&self, provider: &str) -> Option<&ProviderCredentials> {
        self.credentials.get(provider)
    }

    /// The fixed OAuth callback redirect URI for a provider.
    pub fn callback_url(&self, provider: &str) -> String {
        format!("{}/auth/{}/callback", self.base_url, provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_url_is_per_provider() {
        let config = Config {
            host: "0.0.0.0".into(),
            port: 8420,
            base_url: "https://auth.example.com".into(),
            app_url: "https://app.example.com".into(),
            token_file: PathBuf::from("tokens.json"),
            credentials: HashMap::new(),
        };
        assert_eq!(
            config.callback_url("youtube"),
            "https://auth.example.com/auth/youtube/callback"
        );
    }
}
