use tracing::info;

use crate::distribution::TaskDistributor;
use crate::error::{EngineError, EngineResult};
use crate::miner::Miner;
use crate::task::{Task, TaskKind};
use crate::validation::ValidationPipeline;
use crate::wire::{MetricsHistory, MinerReport, SimulationConfig, SimulationResult, Summary};

/// Metrics are sampled once per this many completed tasks, plus one final
/// sample after the loop.
pub const METRICS_SAMPLE_INTERVAL: u32 = 10;

/// Wasted work charged per verifier per task when computing eta.
const VERIFICATION_OVERHEAD: f64 = 0.1;

/// Checks the invariants a run requires. The server calls this before
/// accepting a request; `Simulation::new` calls it again so a direct engine
/// user gets the same contract.
pub fn validate(config: &SimulationConfig) -> EngineResult<()> {
    if config.num_miners == 0 {
        return Err(EngineError::Validation(
            "num_miners must be at least 1".to_string(),
        ));
    }
    if config.num_tasks == 0 {
        return Err(EngineError::Validation(
            "num_tasks must be at least 1".to_string(),
        ));
    }
    if config.input_size_min >= config.input_size_max {
        return Err(EngineError::Validation(
            "input_size_min must be less than input_size_max".to_string(),
        ));
    }
    config
        .renewable_energy_alpha
        .resolve()
        .map_err(EngineError::Config)?;
    Ok(())
}

/// One simulation run: a miner fleet, a task queue, and the validation
/// pipeline, stepped to completion.
pub struct Simulation {
    config: SimulationConfig,
    rng: fastrand::Rng,
    miners: Vec<Miner>,
    distributor: TaskDistributor,
    validator: ValidationPipeline,
    selection_counts: Vec<u32>,
    completed: u32,
    successful: u32,
    metrics: MetricsRecorder,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> EngineResult<Self> {
        validate(&config)?;
        let alpha = config
            .renewable_energy_alpha
            .resolve()
            .map_err(EngineError::Config)?;

        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        let miners = Miner::spawn_fleet(
            config.num_miners,
            config.max_byzantine_miners,
            config.byzantine_error_rate,
            alpha,
            &mut rng,
        );
        let selection_counts = vec![0; miners.len()];
        let distributor = TaskDistributor::new(config.fault_tolerance_enabled);
        let validator = ValidationPipeline::new(
            config.reward_multiplier,
            config.verifier_reward_multiplier,
        );

        Ok(Self {
            config,
            rng,
            miners,
            distributor,
            validator,
            selection_counts,
            completed: 0,
            successful: 0,
            metrics: MetricsRecorder::default(),
        })
    }

    fn generate_task(&mut self) -> Task {
        let kind = TaskKind::random(&mut self.rng);
        let size = self
            .rng
            .u32(self.config.input_size_min..=self.config.input_size_max);
        Task::generate(kind, size, &mut self.rng)
    }

    /// Runs the task loop to completion and reports the results. Seeded
    /// runs are fully deterministic.
    pub fn run(mut self) -> SimulationResult {
        info!(
            "⛏️  Starting run: {} miners ({} Byzantine), {} tasks",
            self.config.num_miners,
            self.miners.iter().filter(|m| m.is_byzantine).count(),
            self.config.num_tasks
        );

        for _ in 0..self.config.num_tasks {
            let task = self.generate_task();
            self.distributor.push(task);
        }

        while self.completed < self.config.num_tasks {
            let Some(assignment) = self.distributor.next_assignment(
                &self.miners,
                self.config.num_verifiers as usize,
                &mut self.rng,
            ) else {
                break;
            };

            self.selection_counts[assignment.executor] += 1;
            let solution =
                self.miners[assignment.executor].execute(&assignment.task, &mut self.rng);

            if self
                .validator
                .process(&assignment, &solution, &mut self.miners)
            {
                self.successful += 1;
            }
            self.completed += 1;

            if self.completed % METRICS_SAMPLE_INTERVAL == 0 {
                self.sample_metrics();
            }
        }

        self.sample_metrics();
        let result = self.finalize();
        info!(
            "✅ Run complete: {}/{} tasks succeeded ({:.2}%)",
            result.summary.successful_tasks,
            result.summary.total_tasks,
            result.summary.success_rate * 100.0
        );
        result
    }

    fn success_rate(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.successful as f64 / self.completed as f64
        }
    }

    /// eta = U / (U + W): useful work over useful plus wasted, with
    /// verification overhead charged per verifier per task.
    fn useful_work_efficiency(&self) -> f64 {
        if self.completed == 0 {
            return 0.0;
        }
        let useful = self.successful as f64;
        let wasted = (self.completed - self.successful) as f64
            + self.completed as f64 * self.config.num_verifiers as f64 * VERIFICATION_OVERHEAD;
        if useful + wasted > 0.0 {
            useful / (useful + wasted)
        } else {
            0.0
        }
    }

    fn sample_metrics(&mut self) {
        let success_rate = self.success_rate();
        let efficiency = self.useful_work_efficiency();
        self.metrics.record(&self.miners, success_rate, efficiency);
    }

    fn finalize(self) -> SimulationResult {
        let threshold = self.config.byzantine_threshold;
        let detected: Vec<&Miner> = self
            .miners
            .iter()
            .filter(|m| m.error_rate > threshold)
            .collect();
        let honest: Vec<&Miner> = self
            .miners
            .iter()
            .filter(|m| m.error_rate <= threshold)
            .collect();

        let avg = |values: Vec<f64>| {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        };

        let summary = Summary {
            total_tasks: self.completed,
            successful_tasks: self.successful,
            success_rate: self.success_rate(),
            useful_work_efficiency: self.useful_work_efficiency(),
            byzantine_count: self.miners.iter().filter(|m| m.is_byzantine).count() as u32,
            detected_byzantine_count: detected.len() as u32,
            avg_tasks_honest: avg(honest.iter().map(|m| m.tasks_completed as f64).collect()),
            avg_tasks_byzantine: avg(detected.iter().map(|m| m.tasks_completed as f64).collect()),
            avg_tokens_honest: avg(honest.iter().map(|m| m.tokens).collect()),
            avg_tokens_byzantine: avg(detected.iter().map(|m| m.tokens).collect()),
            num_verifiers: self.config.num_verifiers,
            fault_tolerance_enabled: self.config.fault_tolerance_enabled,
        };

        // Report miners richest-first; renderers preserve this order.
        let mut order: Vec<usize> = (0..self.miners.len()).collect();
        order.sort_by(|&a, &b| {
            self.miners[b]
                .tokens
                .partial_cmp(&self.miners[a].tokens)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let miners = order
            .into_iter()
            .map(|i| {
                let m = &self.miners[i];
                MinerReport {
                    id: m.id,
                    score: m.score,
                    renewable_energy: m.renewable_share,
                    tasks_completed: m.tasks_completed,
                    selection_count: self.selection_counts[i],
                    penalties: m.penalties,
                    error_rate: m.error_rate,
                    tokens: m.tokens,
                    is_byzantine: m.is_byzantine,
                    detected_byzantine: m.error_rate > threshold,
                }
            })
            .collect();

        SimulationResult {
            summary,
            metrics: self.metrics.finish(),
            miners,
        }
    }
}

/// Accumulates the visualization series at the sampling cadence.
#[derive(Default)]
struct MetricsRecorder {
    history: MetricsHistory,
}

impl MetricsRecorder {
    fn record(&mut self, miners: &[Miner], success_rate: f64, efficiency: f64) {
        for m in miners {
            self.history.scores.entry(m.id).or_default().push(m.score);
            self.history.tokens.entry(m.id).or_default().push(m.tokens);
        }
        let avg_renewable =
            miners.iter().map(|m| m.renewable_share).sum::<f64>() / miners.len() as f64;
        self.history.renewable_energy.push(avg_renewable);
        self.history.success_rate.push(success_rate);
        self.history.useful_work_efficiency.push(efficiency);
    }

    fn finish(self) -> MetricsHistory {
        self.history
    }
}
