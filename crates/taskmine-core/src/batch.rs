use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::engine::Simulation;
use crate::error::{EngineError, EngineResult};
use crate::wire::SimulationConfig;

/// Aggregate statistics over seeded replicate runs. The intervals are 95%
/// normal approximations: 1.96 · sigma / sqrt(n).
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub num_runs: u32,
    pub success_rate_mean: f64,
    pub success_rate_std: f64,
    pub success_rate_ci: f64,
    pub efficiency_mean: f64,
    pub efficiency_std: f64,
    pub efficiency_ci: f64,
}

/// Runs `num_runs` replicates seeded 0..n in parallel and aggregates the
/// success rate and useful-work efficiency. Replicates are independent, so
/// this is the one engine path that fans out across threads.
pub fn run_batch(config: &SimulationConfig, num_runs: u32) -> EngineResult<BatchSummary> {
    if num_runs == 0 {
        return Err(EngineError::Validation(
            "num_runs must be at least 1".to_string(),
        ));
    }
    crate::engine::validate(config)?;

    info!("📊 Running {} replicates for statistics", num_runs);

    let outcomes: Vec<(f64, f64)> = (0..num_runs as u64)
        .into_par_iter()
        .map(|seed| {
            let mut replicate = config.clone();
            replicate.seed = Some(seed);
            Simulation::new(replicate).map(|sim| {
                let result = sim.run();
                (
                    result.summary.success_rate,
                    result.summary.useful_work_efficiency,
                )
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let success_rates: Vec<f64> = outcomes.iter().map(|o| o.0).collect();
    let efficiencies: Vec<f64> = outcomes.iter().map(|o| o.1).collect();

    let n = num_runs as f64;
    let success_rate_mean = mean(&success_rates);
    let success_rate_std = std_dev(&success_rates, success_rate_mean);
    let efficiency_mean = mean(&efficiencies);
    let efficiency_std = std_dev(&efficiencies, efficiency_mean);

    Ok(BatchSummary {
        num_runs,
        success_rate_mean,
        success_rate_std,
        success_rate_ci: 1.96 * success_rate_std / n.sqrt(),
        efficiency_mean,
        efficiency_std,
        efficiency_ci: 1.96 * efficiency_std / n.sqrt(),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
