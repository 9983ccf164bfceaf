use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// The four useful-work task classes miners compete over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TaskKind {
    Addition,
    Multiplication,
    Sorting,
    Searching,
}

impl TaskKind {
    /// Per-unit cost multiplier (equation 1). Sorting scales with the input
    /// size, so its total cost is quadratic.
    fn complexity(&self, input_size: u32) -> f64 {
        match self {
            TaskKind::Sorting => input_size as f64,
            _ => 1.0,
        }
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let kinds: Vec<TaskKind> = TaskKind::iter().collect();
        kinds[rng.usize(..kinds.len())]
    }
}

/// A correct or claimed answer to one task.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    Sum(i64),
    Product(f64),
    Sorted(Vec<i64>),
    Found(bool),
}

/// One unit of useful work: a kind, its input data, and the cost C(t) it
/// pays out on acceptance.
#[derive(Debug, Clone)]
pub struct Task {
    pub kind: TaskKind,
    pub input_data: Vec<i64>,
    pub cost: f64,
}

impl Task {
    pub fn generate(kind: TaskKind, input_size: u32, rng: &mut fastrand::Rng) -> Self {
        let input_data = (0..input_size).map(|_| rng.i64(1..=100)).collect();
        let cost = kind.complexity(input_size) * input_size as f64;
        Self {
            kind,
            input_data,
            cost,
        }
    }

    /// The reference answer. Deterministic per task, so every verifier that
    /// recomputes it lands on the same value.
    pub fn solve(&self) -> Solution {
        match self.kind {
            TaskKind::Addition => Solution::Sum(self.input_data.iter().sum()),
            TaskKind::Multiplication => {
                Solution::Product(self.input_data.iter().map(|&v| v as f64).product())
            }
            TaskKind::Sorting => {
                let mut sorted = self.input_data.clone();
                sorted.sort_unstable();
                Solution::Sorted(sorted)
            }
            // The probe value is drawn from the input itself, so membership
            // always holds.
            TaskKind::Searching => Solution::Found(true),
        }
    }

    pub fn verify(&self, solution: &Solution) -> bool {
        *solution == self.solve()
    }
}
