//! Pure render models. Every builder maps one slice of a result to a chart
//! or table model with no terminal coupling, so the presentation rules are
//! testable on their own.

use comfy_table::Color;
use std::collections::BTreeMap;
use taskmine_protocol::{MinerReport, Summary};

/// Bar colors keyed off the Byzantine flag.
pub const HONEST_COLOR: Color = Color::Blue;
pub const BYZANTINE_COLOR: Color = Color::Red;

/// Line series kept in the scores chart before visual clutter wins.
pub const SCORES_CHART_MAX_SERIES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub completed: u32,
    pub total: u32,
    pub success_rate: f64,
}

impl ProgressView {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }

    pub fn task_text(&self) -> String {
        format!("{} / {} tasks completed", self.completed, self.total)
    }

    pub fn rate_text(&self) -> String {
        format!("Success Rate: {:.2}%", self.success_rate * 100.0)
    }
}

/// The four headline numbers, pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub total_tasks: String,
    pub successful_tasks: String,
    pub success_rate: String,
    pub byzantine_count: String,
}

pub fn summary_view(summary: &Summary) -> SummaryView {
    SummaryView {
        total_tasks: summary.total_tasks.to_string(),
        successful_tasks: summary.successful_tasks.to_string(),
        success_rate: format!("{:.2}%", summary.success_rate * 100.0),
        byzantine_count: summary.byzantine_count.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<f64>,
}

/// One line plot. A `y_range` of `None` scales to the data.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub series: Vec<Series>,
    pub y_range: Option<(f64, f64)>,
    pub percent_axis: bool,
    pub filled: bool,
}

/// Scores over time: one line per miner, capped at the first
/// [`SCORES_CHART_MAX_SERIES`] ids in the map's iteration order.
pub fn scores_chart(scores: &BTreeMap<u32, Vec<f64>>) -> LineChart {
    let series = scores
        .iter()
        .take(SCORES_CHART_MAX_SERIES)
        .map(|(id, points)| Series {
            name: format!("Miner {}", id),
            points: points.clone(),
        })
        .collect();

    LineChart {
        title: "Miner Scores Over Time".to_string(),
        series,
        y_range: None,
        percent_axis: false,
        filled: false,
    }
}

/// Success rate over time: a single filled series on a fixed [0, 1] axis.
pub fn success_chart(points: &[f64]) -> LineChart {
    LineChart {
        title: "Success Rate Over Time".to_string(),
        series: vec![Series {
            name: "Success Rate".to_string(),
            points: points.to_vec(),
        }],
        y_range: Some((0.0, 1.0)),
        percent_axis: true,
        filled: true,
    }
}

/// Renewable energy over time: a single filled series, axis scaled to 1.2×
/// the observed maximum.
pub fn energy_chart(points: &[f64]) -> LineChart {
    let max = points.iter().copied().fold(0.0f64, f64::max);
    LineChart {
        title: "Renewable Energy Usage".to_string(),
        series: vec![Series {
            name: "Avg Renewable Energy".to_string(),
            points: points.to_vec(),
        }],
        y_range: Some((0.0, max * 1.2)),
        percent_axis: true,
        filled: true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// The value formatted to two decimals, shown next to the bar.
    pub text: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

/// Token distribution: one bar per miner in result order, colored by the
/// Byzantine flag.
pub fn tokens_chart(miners: &[MinerReport]) -> BarChart {
    let bars = miners
        .iter()
        .map(|m| Bar {
            label: format!("Miner {}", m.id),
            value: m.tokens,
            text: format!("{:.2}", m.tokens),
            color: if m.is_byzantine {
                BYZANTINE_COLOR
            } else {
                HONEST_COLOR
            },
        })
        .collect();

    BarChart {
        title: "Token Distribution".to_string(),
        bars,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinerRow {
    pub id: String,
    pub score: String,
    pub renewable_energy: String,
    pub tasks_completed: String,
    pub error_rate: String,
    pub tokens: String,
    pub status: String,
    pub is_byzantine: bool,
}

/// Table rows in result order; no sorting is applied here.
pub fn miner_rows(miners: &[MinerReport]) -> Vec<MinerRow> {
    miners
        .iter()
        .map(|m| MinerRow {
            id: m.id.to_string(),
            score: format!("{:.2}", m.score),
            renewable_energy: format!("{:.2}%", m.renewable_energy * 100.0),
            tasks_completed: m.tasks_completed.to_string(),
            error_rate: format!("{:.2}%", m.error_rate * 100.0),
            tokens: format!("{:.2}", m.tokens),
            status: if m.is_byzantine {
                "Byzantine".to_string()
            } else {
                "Normal".to_string()
            },
            is_byzantine: m.is_byzantine,
        })
        .collect()
}
