pub mod api;
pub mod config;
pub mod error;
pub mod providers;
pub mod store;

pub use config::Config;
pub use error::AuthError;

use std::sync::Arc;

/// Shared application state passed to all API handlers.
pub struct AppState {
    pub config: Config,
    pub store: store::TokenStore,
    pub registry: providers::ProviderRegistry,
}

pub type SharedState = Arc<AppState>;
