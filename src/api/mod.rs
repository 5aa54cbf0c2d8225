//! API router for the social-auth service.
//!
//! Per provider (`instagram`, `youtube`):
//! - GET    /auth/{provider}/login    — redirect to the provider's consent screen
//! - GET    /auth/{provider}/callback — code exchange + token store write
//! - GET    /auth/{provider}/status   — connection status, served from the store
//! - DELETE /auth/{provider}/status   — disconnect
//! Plus GET /status for health and GET /auth/providers for the provider list.

pub mod routes;

use crate::SharedState;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
