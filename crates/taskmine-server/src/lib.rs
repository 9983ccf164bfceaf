pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assembles the full application router with the layers the binary serves.
/// Tests mount the same router on an ephemeral port.
pub fn app(state: Arc<AppState>) -> Router {
    routes::system_routes()
        .merge(routes::api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
