use axum::Json;
use taskmine_core::engine::Simulation;
use taskmine_core::wire::{SimulationConfig, SimulationResult};
use tracing::info;

use crate::error::AppResult;

/// Runs one simulation synchronously and returns the complete result.
/// Invariant violations come back as 400 before any work starts.
pub async fn simulate_sync(
    Json(config): Json<SimulationConfig>,
) -> AppResult<Json<SimulationResult>> {
    info!(
        "⛏️  Simulation requested: {} miners, {} tasks",
        config.num_miners, config.num_tasks
    );

    let sim = Simulation::new(config)?;
    // The run is CPU-bound; keep it off the async executor.
    let result = tokio::task::spawn_blocking(move || sim.run())
        .await
        .map_err(anyhow::Error::from)?;

    info!(
        "✅ Simulation finished: success rate {:.2}%",
        result.summary.success_rate * 100.0
    );
    Ok(Json(result))
}
