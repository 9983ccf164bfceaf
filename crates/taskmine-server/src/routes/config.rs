use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use taskmine_core::wire::SimulationConfig;

use crate::state::AppState;

/// Serves the published defaults the console fills its form with.
pub async fn default_config(State(state): State<Arc<AppState>>) -> Json<SimulationConfig> {
    Json(state.defaults.clone())
}
