use tracing::error;

use taskmine_protocol::{SimulationConfig, SimulationResult};

use crate::client::ApiClient;
use crate::form::{Field, FormError, FormState};
use crate::view::{
    energy_chart, miner_rows, scores_chart, success_chart, summary_view, tokens_chart, BarChart,
    LineChart, MinerRow, ProgressView, SummaryView,
};

/// Run trigger states, mirrored to the surface around every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunControl {
    Ready,
    Busy,
}

/// Everything the controller shows. Implemented by [`crate::term::Terminal`]
/// for stdout and by recording fakes in tests, keeping the run logic free of
/// any rendering environment.
pub trait ConsoleSurface {
    fn render_form(&mut self, form: &FormState);
    fn set_run_control(&mut self, control: RunControl);
    fn show_progress(&mut self, progress: &ProgressView);
    fn show_loading(&mut self, message: &str);
    fn hide_loading(&mut self);
    fn alert(&mut self, message: &str);
    fn show_summary(&mut self, summary: &SummaryView);
    fn draw_line_chart(&mut self, chart: &LineChart);
    fn draw_bar_chart(&mut self, chart: &BarChart);
    fn show_miner_rows(&mut self, rows: &[MinerRow]);
}

/// The stateful UI controller: loads defaults into the form, reads the form
/// back, runs one simulation at a time, and renders the result.
///
/// Run lifecycle: Idle → Running → (Success | Failed) → Idle. A trigger
/// while running is dropped, not queued; the trigger control is restored
/// exactly once per run regardless of outcome.
pub struct SimulationConsole<S: ConsoleSurface> {
    client: ApiClient,
    surface: S,
    form: FormState,
    current_config: Option<SimulationConfig>,
    running: bool,
}

impl<S: ConsoleSurface> SimulationConsole<S> {
    pub fn new(client: ApiClient, surface: S) -> Self {
        Self {
            client,
            surface,
            form: FormState::default(),
            current_config: None,
            running: false,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn current_config(&self) -> Option<&SimulationConfig> {
        self.current_config.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<(), FormError> {
        self.form.set(field, raw)
    }

    pub fn show_form(&mut self) {
        self.surface.render_form(&self.form);
    }

    /// Writes a configuration into the form and remembers it as current.
    pub fn apply_config(&mut self, config: &SimulationConfig) {
        self.form.write_config(config);
        self.current_config = Some(config.clone());
    }

    /// Fetches the published defaults and fills the form. Failure is logged,
    /// not surfaced: the form keeps whatever it held.
    pub async fn load_defaults(&mut self) {
        match self.client.default_config().await {
            Ok(config) => {
                self.apply_config(&config);
                self.surface.render_form(&self.form);
            }
            Err(e) => error!("Error loading default config: {}", e),
        }
    }

    /// Reset discards edits by reloading the published defaults.
    pub async fn reset(&mut self) {
        self.load_defaults().await;
    }

    /// Triggers one run from the form. No-ops while a run is in flight;
    /// validates before any network traffic; always restores the trigger
    /// control.
    pub async fn run(&mut self) {
        if self.running {
            return;
        }

        let config = match self.form.read_config() {
            Ok(config) => config,
            Err(e) => {
                self.surface.alert(&e.to_string());
                return;
            }
        };
        self.run_config(config).await;
    }

    /// Runs a fully-formed configuration through the same lifecycle. The
    /// one-shot command uses this directly so flag overrides the form does
    /// not carry (seed, verifier count) survive.
    pub async fn run_config(&mut self, config: SimulationConfig) {
        if self.running {
            return;
        }
        if config.input_size_min >= config.input_size_max {
            self.surface
                .alert("Min input size must be less than max input size");
            return;
        }

        self.running = true;
        self.surface.set_run_control(RunControl::Busy);
        self.surface.show_progress(&ProgressView {
            completed: 0,
            total: config.num_tasks,
            success_rate: 0.0,
        });
        self.surface.show_loading("Running simulation...");

        match self.client.run_simulation(&config).await {
            Ok(result) => {
                // The sync endpoint reports no increments; progress jumps
                // straight to the result's own totals.
                self.surface.show_progress(&ProgressView {
                    completed: result.summary.total_tasks,
                    total: result.summary.total_tasks,
                    success_rate: result.summary.success_rate,
                });
                self.render_results(&result);
            }
            Err(e) => {
                error!("Error running simulation: {}", e);
                self.surface
                    .alert("Error running simulation. Please check the logs for details.");
                self.surface.show_loading("Error running simulation");
            }
        }

        self.running = false;
        self.surface.set_run_control(RunControl::Ready);
    }

    fn render_results(&mut self, result: &SimulationResult) {
        self.surface.hide_loading();
        self.surface.show_summary(&summary_view(&result.summary));
        self.surface
            .draw_line_chart(&scores_chart(&result.metrics.scores));
        self.surface.draw_bar_chart(&tokens_chart(&result.miners));
        self.surface
            .draw_line_chart(&success_chart(&result.metrics.success_rate));
        self.surface
            .draw_line_chart(&energy_chart(&result.metrics.renewable_energy));
        self.surface.show_miner_rows(&miner_rows(&result.miners));
    }
}
