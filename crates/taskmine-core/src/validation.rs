use crate::distribution::Assignment;
use crate::miner::Miner;
use crate::task::Solution;

/// Approvals required for a solution to be accepted (equation 11): ⌈V/2⌉.
pub fn quorum(num_verifiers: usize) -> usize {
    num_verifiers.div_ceil(2)
}

/// Quorum validation and reward/penalty settlement (equations 5-12).
pub struct ValidationPipeline {
    /// Base reward multiplier k.
    pub k: f64,
    /// Verifier reward coefficient z.
    pub z: f64,
}

impl ValidationPipeline {
    pub fn new(k: f64, z: f64) -> Self {
        Self { k, z }
    }

    /// Runs the verifier vote and settles the outcome. On acceptance the
    /// executor earns k·C·(1+alpha) as score and tokens (equations 5-7) and
    /// each verifier earns k·C·z (equation 8); on rejection the executor is
    /// penalized by C (equation 10). Returns whether the solution passed.
    pub fn process(
        &self,
        assignment: &Assignment,
        solution: &Solution,
        miners: &mut [Miner],
    ) -> bool {
        // Every verifier recomputes the reference answer independently.
        let mut approvals = 0;
        for _verifier in &assignment.verifiers {
            if assignment.task.verify(solution) {
                approvals += 1;
            }
        }

        let accepted = approvals >= quorum(assignment.verifiers.len());
        let cost = assignment.task.cost;

        if accepted {
            let executor = &mut miners[assignment.executor];
            let reward = self.k * cost * (1.0 + executor.renewable_share);
            executor.reward(reward);
            executor.receive_tokens(reward);
            executor.tasks_completed += 1;

            let verifier_reward = self.k * cost * self.z;
            for &v in &assignment.verifiers {
                miners[v].reward(verifier_reward);
                miners[v].receive_tokens(verifier_reward);
            }
        } else {
            miners[assignment.executor].apply_penalty(cost);
        }

        accepted
    }
}
