pub mod config;
pub mod simulate;
pub mod system;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

pub fn system_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", axum::routing::get(system::root))
        .route("/health", axum::routing::get(system::health))
}

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/config/default",
            axum::routing::get(config::default_config),
        )
        .route(
            "/api/simulate/sync",
            axum::routing::post(simulate::simulate_sync),
        )
}
