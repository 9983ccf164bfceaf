use crate::task::{Solution, Task, TaskKind};
use crate::util::sample;

/// Error probability for honest miners (equation 3 gives Byzantine miners
/// a configurable, much higher one).
pub const HONEST_ERROR_PROBABILITY: f64 = 0.02;

/// One simulated participant. Score and token mutation goes through the
/// reward/penalty methods so the accounting invariants hold: the score is
/// floored at zero, tokens are never deducted.
#[derive(Debug, Clone)]
pub struct Miner {
    pub id: u32,
    pub score: f64,
    /// alpha_m: proportion of this miner's energy from renewables, in [0, 0.5].
    pub renewable_share: f64,
    pub tasks_completed: u32,
    pub penalties: u32,
    pub tokens: f64,
    pub error_probability: f64,
    pub is_byzantine: bool,
    pub error_rate: f64,
    attempts: u32,
    failures: u32,
}

impl Miner {
    pub fn new(
        id: u32,
        is_byzantine: bool,
        byzantine_error_rate: f64,
        alpha: Option<f64>,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let error_probability = if is_byzantine {
            byzantine_error_rate
        } else {
            HONEST_ERROR_PROBABILITY
        };
        Self {
            id,
            score: 0.0,
            renewable_share: alpha.unwrap_or_else(|| rng.f64() * 0.5),
            tasks_completed: 0,
            penalties: 0,
            tokens: 0.0,
            error_probability,
            is_byzantine,
            error_rate: 0.0,
            attempts: 0,
            failures: 0,
        }
    }

    /// Creates `num_miners` miners with exactly `min(max_byzantine, num_miners)`
    /// Byzantine ones, placed uniformly at random. A fixed `alpha` applies to
    /// every miner; `None` draws alpha_m ~ U[0, 0.5] per miner.
    pub fn spawn_fleet(
        num_miners: u32,
        max_byzantine: u32,
        byzantine_error_rate: f64,
        alpha: Option<f64>,
        rng: &mut fastrand::Rng,
    ) -> Vec<Miner> {
        let n = num_miners as usize;
        let byzantine_ids = sample(
            (0..n).collect(),
            (max_byzantine as usize).min(n),
            rng,
        );

        (0..num_miners)
            .map(|id| {
                let is_byzantine = byzantine_ids.contains(&(id as usize));
                Miner::new(id, is_byzantine, byzantine_error_rate, alpha, rng)
            })
            .collect()
    }

    /// Executes a task, injecting a kind-specific fault with this miner's
    /// error probability. Failure bookkeeping updates the observed error
    /// rate either way.
    pub fn execute(&mut self, task: &Task, rng: &mut fastrand::Rng) -> Solution {
        self.attempts += 1;
        let correct = task.solve();

        let solution = if rng.f64() < self.error_probability {
            self.failures += 1;
            corrupt(correct, task.kind, rng)
        } else {
            correct
        };

        self.error_rate = self.failures as f64 / self.attempts as f64;
        solution
    }

    /// Selection weight per equation 4: the score share, cut to 10% for
    /// Byzantine-looking error rates and halved for suspicious ones. With
    /// fault tolerance off every miner weighs the same; with no scores on
    /// the board a flat floor applies.
    pub fn selection_weight(&self, total_score: f64, fault_tolerance_enabled: bool) -> f64 {
        if !fault_tolerance_enabled {
            return 1.0;
        }
        if total_score == 0.0 {
            return 1.0 / 100.0;
        }

        let base = self.score / total_score;
        if self.error_rate > 0.2 {
            base * 0.1
        } else if self.error_rate > 0.15 {
            base * 0.5
        } else {
            base
        }
    }

    pub fn reward(&mut self, amount: f64) {
        self.score += amount;
    }

    pub fn receive_tokens(&mut self, amount: f64) {
        self.tokens += amount;
    }

    /// Equation 10: the score drops by the task cost but never below zero.
    pub fn apply_penalty(&mut self, penalty: f64) {
        self.score = (self.score - penalty).max(0.0);
        self.penalties += 1;
    }
}

/// Kind-specific fault injection: a small additive offset, a multiplicative
/// wobble, a swap in the sorted output, or a negated search verdict.
fn corrupt(correct: Solution, kind: TaskKind, rng: &mut fastrand::Rng) -> Solution {
    match (kind, correct) {
        (TaskKind::Addition, Solution::Sum(v)) => Solution::Sum(v + rng.i64(-10..=10)),
        (TaskKind::Multiplication, Solution::Product(v)) => {
            Solution::Product(v * (0.9 + rng.f64() * 0.2))
        }
        (TaskKind::Sorting, Solution::Sorted(mut v)) => {
            if v.len() > 1 {
                let picked = sample((0..v.len()).collect(), 2, rng);
                v.swap(picked[0], picked[1]);
            }
            Solution::Sorted(v)
        }
        (TaskKind::Searching, Solution::Found(b)) => Solution::Found(!b),
        // solve() always yields the matching variant for its kind.
        (_, other) => other,
    }
}
