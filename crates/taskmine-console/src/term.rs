//! Stdout implementation of the presentation port. Charts are drawn as
//! ASCII canvases and tables through comfy-table; this is the only module
//! that prints.

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use strum::IntoEnumIterator;

use crate::console::{ConsoleSurface, RunControl};
use crate::form::{Field, FormState};
use crate::view::{BarChart, LineChart, MinerRow, ProgressView, SummaryView};

const CHART_WIDTH: usize = 64;
const CHART_HEIGHT: usize = 14;
const PROGRESS_BAR_WIDTH: usize = 40;
const TOKEN_BAR_WIDTH: usize = 40;
const SERIES_MARKS: &[char] = &['*', '+', 'o', 'x', '#', '@', '%', '&', '=', '~'];

pub struct Terminal;

impl ConsoleSurface for Terminal {
    fn render_form(&mut self, form: &FormState) {
        let mut table = Table::new();
        table
            .load_preset(ASCII_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.add_row(vec![
            Cell::new("Parameter").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
        for field in Field::iter() {
            table.add_row(vec![Cell::new(field.to_string()), Cell::new(form.get(field))]);
        }
        println!("{}", table);
    }

    fn set_run_control(&mut self, control: RunControl) {
        match control {
            RunControl::Busy => println!("⏳ Running..."),
            RunControl::Ready => println!("▶ Run Simulation"),
        }
    }

    fn show_progress(&mut self, progress: &ProgressView) {
        let filled = ((progress.percentage() / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(PROGRESS_BAR_WIDTH);
        println!(
            "[{}{}] {}  |  {}",
            "█".repeat(filled),
            "░".repeat(PROGRESS_BAR_WIDTH - filled),
            progress.task_text(),
            progress.rate_text()
        );
    }

    fn show_loading(&mut self, message: &str) {
        println!("{}", message);
    }

    fn hide_loading(&mut self) {
        // Terminal output scrolls; there is nothing to retract.
    }

    fn alert(&mut self, message: &str) {
        println!("⚠️  {}", message);
    }

    fn show_summary(&mut self, summary: &SummaryView) {
        let mut table = Table::new();
        table
            .load_preset(ASCII_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.add_row(vec![
            Cell::new("Total Tasks").add_attribute(Attribute::Bold),
            Cell::new("Successful").add_attribute(Attribute::Bold),
            Cell::new("Success Rate").add_attribute(Attribute::Bold),
            Cell::new("Byzantine Miners").add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new(&summary.total_tasks),
            Cell::new(&summary.successful_tasks).fg(Color::Green),
            Cell::new(&summary.success_rate).fg(Color::Cyan),
            Cell::new(&summary.byzantine_count).fg(Color::Red),
        ]);
        println!("\n{}", table);
    }

    fn draw_line_chart(&mut self, chart: &LineChart) {
        println!("\n{}", chart.title);

        let (lo, hi) = bounds(chart);
        let mut canvas = vec![vec![' '; CHART_WIDTH]; CHART_HEIGHT];
        for (idx, series) in chart.series.iter().enumerate() {
            let mark = SERIES_MARKS[idx % SERIES_MARKS.len()];
            plot(&mut canvas, &series.points, lo, hi, mark, chart.filled);
        }

        for (row_idx, row) in canvas.iter().enumerate() {
            let y = hi - (hi - lo) * row_idx as f64 / (CHART_HEIGHT - 1) as f64;
            let label = if chart.percent_axis {
                format!("{:>7.1}%", y * 100.0)
            } else {
                format!("{:>8.1}", y)
            };
            println!("{} |{}", label, row.iter().collect::<String>());
        }
        println!("{} +{}", " ".repeat(8), "-".repeat(CHART_WIDTH));

        if chart.series.len() > 1 {
            for (idx, series) in chart.series.iter().enumerate() {
                println!("  {} {}", SERIES_MARKS[idx % SERIES_MARKS.len()], series.name);
            }
        }
    }

    fn draw_bar_chart(&mut self, chart: &BarChart) {
        println!("\n{}", chart.title);

        let max = chart.bars.iter().map(|b| b.value).fold(0.0f64, f64::max);
        let mut table = Table::new();
        table
            .load_preset(ASCII_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        for bar in &chart.bars {
            let len = if max > 0.0 {
                ((bar.value / max) * TOKEN_BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            table.add_row(vec![
                Cell::new(&bar.label),
                Cell::new("█".repeat(len)).fg(bar.color),
                Cell::new(&bar.text).set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{}", table);
    }

    fn show_miner_rows(&mut self, rows: &[MinerRow]) {
        let mut table = Table::new();
        table
            .load_preset(ASCII_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.add_row(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Score"),
            Cell::new("Renewable"),
            Cell::new("Tasks"),
            Cell::new("Error Rate"),
            Cell::new("Tokens").add_attribute(Attribute::Bold),
            Cell::new("Status"),
        ]);
        for i in 1..=5 {
            if let Some(col) = table.column_mut(i) {
                col.set_cell_alignment(CellAlignment::Right);
            }
        }

        for row in rows {
            let status_color = if row.is_byzantine {
                Color::Red
            } else {
                Color::Green
            };
            table.add_row(vec![
                Cell::new(&row.id).add_attribute(Attribute::Bold),
                Cell::new(&row.score),
                Cell::new(&row.renewable_energy),
                Cell::new(&row.tasks_completed),
                Cell::new(&row.error_rate),
                Cell::new(&row.tokens).add_attribute(Attribute::Bold),
                Cell::new(&row.status).fg(status_color),
            ]);
        }
        println!("\n{}", table);
    }
}

/// Axis bounds: the fixed range if the chart carries one, otherwise the
/// data extent, widened when it would be degenerate.
fn bounds(chart: &LineChart) -> (f64, f64) {
    let (lo, hi) = match chart.y_range {
        Some(range) => range,
        None => {
            let mut lo = f64::MAX;
            let mut hi = f64::MIN;
            for series in &chart.series {
                for &v in &series.points {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }
            if lo > hi {
                (0.0, 1.0)
            } else {
                (lo, hi)
            }
        }
    };
    if hi - lo < f64::EPSILON {
        (lo, lo + 1.0)
    } else {
        (lo, hi)
    }
}

fn plot(canvas: &mut [Vec<char>], points: &[f64], lo: f64, hi: f64, mark: char, filled: bool) {
    let height = canvas.len();
    if points.is_empty() {
        return;
    }

    for (i, &v) in points.iter().enumerate() {
        let col = if points.len() > 1 {
            i * (CHART_WIDTH - 1) / (points.len() - 1)
        } else {
            0
        };
        let norm = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
        let row = height - 1 - (norm * (height - 1) as f64).round() as usize;

        canvas[row][col] = mark;
        if filled {
            for fill_row in canvas.iter_mut().take(height).skip(row + 1) {
                if fill_row[col] == ' ' {
                    fill_row[col] = '.';
                }
            }
        }
    }
}
