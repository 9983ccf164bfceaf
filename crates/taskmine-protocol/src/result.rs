use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything one finished run reports back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub summary: Summary,
    pub metrics: MetricsHistory,
    /// Sorted by tokens, descending. Renderers preserve this order.
    pub miners: Vec<MinerReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_tasks: u32,
    pub successful_tasks: u32,
    pub success_rate: f64,
    /// eta = U / (U + W): useful work over useful plus wasted work,
    /// verification overhead counted at 0.1 per verifier per task.
    pub useful_work_efficiency: f64,
    /// Miners created Byzantine.
    pub byzantine_count: u32,
    /// Miners whose observed error rate crossed the detection threshold.
    pub detected_byzantine_count: u32,
    pub avg_tasks_honest: f64,
    pub avg_tasks_byzantine: f64,
    pub avg_tokens_honest: f64,
    pub avg_tokens_byzantine: f64,
    pub num_verifiers: u32,
    pub fault_tolerance_enabled: bool,
}

/// Time series sampled every ten completed tasks plus one final sample.
///
/// The per-miner maps key on the numeric miner id; JSON object keys arrive
/// as strings, and a `BTreeMap<u32, _>` puts them back in creation order,
/// which is the order chart builders truncate on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsHistory {
    pub scores: BTreeMap<u32, Vec<f64>>,
    pub tokens: BTreeMap<u32, Vec<f64>>,
    pub renewable_energy: Vec<f64>,
    pub success_rate: Vec<f64>,
    pub useful_work_efficiency: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerReport {
    pub id: u32,
    pub score: f64,
    pub renewable_energy: f64,
    pub tasks_completed: u32,
    pub selection_count: u32,
    pub penalties: u32,
    pub error_rate: f64,
    pub tokens: f64,
    pub is_byzantine: bool,
    pub detected_byzantine: bool,
}
