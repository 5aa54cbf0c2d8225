use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use social_auth::{api, providers, store::TokenStore, AppState, Config, SharedState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_auth=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    info!("social-auth v{}", env!("CARGO_PKG_VERSION"));
    info!("Listening on {}:{}", config.host, config.port);

    let store = TokenStore::open(config.token_file.clone());
    let registry = providers::with_defaults();
    info!("Registered {} OAuth providers", registry.count());

    let configured: Vec<&str> = registry
        .list()
        .into_iter()
        .filter(|id| config.credentials(id).is_some())
        .collect();
    info!("Providers with credentials: {configured:?}");

    let state: SharedState = Arc::new(AppState {
        config: config.clone(),
        store,
        registry,
    });

    let app = api::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server ready");
    axum::serve(listener, app).await?;

    Ok(())
}
