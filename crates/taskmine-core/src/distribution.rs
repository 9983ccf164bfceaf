use std::collections::VecDeque;

use crate::miner::Miner;
use crate::task::Task;
use crate::util::sample;

/// One task handed out: who executes it and who sits on the verifier
/// committee. Indices into the engine's miner slice, since the engine owns
/// the miners.
pub struct Assignment {
    pub task: Task,
    pub executor: usize,
    pub verifiers: Vec<usize>,
}

/// FIFO task queue plus the selection rules that pair each task with an
/// executor and a verifier committee.
pub struct TaskDistributor {
    queue: VecDeque<Task>,
    pub fault_tolerance_enabled: bool,
}

impl TaskDistributor {
    pub fn new(fault_tolerance_enabled: bool) -> Self {
        Self {
            queue: VecDeque::new(),
            fault_tolerance_enabled,
        }
    }

    pub fn push(&mut self, task: Task) {
        self.queue.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pops the next task and picks its executor and verifiers. The
    /// committee excludes the executor and holds
    /// `min(num_verifiers, miners - 1)` members.
    pub fn next_assignment(
        &mut self,
        miners: &[Miner],
        num_verifiers: usize,
        rng: &mut fastrand::Rng,
    ) -> Option<Assignment> {
        let task = self.queue.pop_front()?;
        let executor = self.select_executor(miners, rng);
        let verifiers = self.select_verifiers(miners.len(), executor, num_verifiers, rng);
        Some(Assignment {
            task,
            executor,
            verifiers,
        })
    }

    /// Score-weighted roulette selection over equation 4 weights.
    fn select_executor(&self, miners: &[Miner], rng: &mut fastrand::Rng) -> usize {
        let total_score: f64 = miners.iter().map(|m| m.score).sum();
        let weights: Vec<f64> = miners
            .iter()
            .map(|m| m.selection_weight(total_score, self.fault_tolerance_enabled))
            .collect();
        roulette(&weights, rng)
    }

    fn select_verifiers(
        &self,
        miner_count: usize,
        executor: usize,
        num_verifiers: usize,
        rng: &mut fastrand::Rng,
    ) -> Vec<usize> {
        let pool: Vec<usize> = (0..miner_count).filter(|&i| i != executor).collect();
        sample(pool, num_verifiers, rng)
    }
}

/// Cumulative-weight roulette draw. A zero total falls back to a uniform
/// pick; rounding past the final boundary lands on the last index.
fn roulette(weights: &[f64], rng: &mut fastrand::Rng) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.usize(..weights.len());
    }

    let mut draw = rng.f64() * total;
    for (i, w) in weights.iter().enumerate() {
        if draw < *w {
            return i;
        }
        draw -= w;
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;

    fn fleet(n: u32, rng: &mut fastrand::Rng) -> Vec<Miner> {
        Miner::spawn_fleet(n, 0, 0.3, Some(0.1), rng)
    }

    #[test]
    fn committee_excludes_executor_and_caps_size() {
        let mut rng = fastrand::Rng::with_seed(11);
        let miners = fleet(5, &mut rng);
        let mut distributor = TaskDistributor::new(true);
        for _ in 0..50 {
            distributor.push(Task::generate(TaskKind::Addition, 10, &mut rng));
        }

        while let Some(assignment) = distributor.next_assignment(&miners, 10, &mut rng) {
            assert_eq!(assignment.verifiers.len(), 4);
            assert!(!assignment.verifiers.contains(&assignment.executor));
            let mut sorted = assignment.verifiers.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 4);
        }
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let mut rng = fastrand::Rng::with_seed(12);
        let miners = fleet(3, &mut rng);
        let mut distributor = TaskDistributor::new(true);
        assert!(distributor
            .next_assignment(&miners, 3, &mut rng)
            .is_none());
    }

    #[test]
    fn roulette_favors_heavy_weights() {
        let mut rng = fastrand::Rng::with_seed(13);
        let weights = [0.0, 0.0, 1.0];
        for _ in 0..100 {
            assert_eq!(roulette(&weights, &mut rng), 2);
        }
    }

    #[test]
    fn roulette_with_zero_total_stays_in_bounds() {
        let mut rng = fastrand::Rng::with_seed(14);
        let weights = [0.0, 0.0, 0.0];
        for _ in 0..100 {
            assert!(roulette(&weights, &mut rng) < weights.len());
        }
    }
}
