//! End-to-end controller tests against a canned in-process HTTP service.
//! A recording surface captures every call the controller makes, so each
//! test asserts on the exact render sequence.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;

use taskmine_console::client::ApiClient;
use taskmine_console::console::{ConsoleSurface, RunControl, SimulationConsole};
use taskmine_console::form::Field;
use taskmine_console::view::{BarChart, LineChart, MinerRow, ProgressView, SummaryView};
use taskmine_protocol::{
    MetricsHistory, MinerReport, SimulationConfig, SimulationResult, Summary,
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Form,
    Control(RunControl),
    Progress(ProgressView),
    Loading(String),
    HideLoading,
    Alert(String),
    Summary(SummaryView),
    LineChart(String),
    BarChart(String),
    Rows(usize),
}

#[derive(Default)]
struct RecordingSurface {
    events: Vec<Event>,
}

impl RecordingSurface {
    fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Alert(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    fn controls(&self) -> Vec<RunControl> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Control(c) => Some(*c),
                _ => None,
            })
            .collect()
    }
}

impl ConsoleSurface for RecordingSurface {
    fn render_form(&mut self, _form: &taskmine_console::form::FormState) {
        self.events.push(Event::Form);
    }
    fn set_run_control(&mut self, control: RunControl) {
        self.events.push(Event::Control(control));
    }
    fn show_progress(&mut self, progress: &ProgressView) {
        self.events.push(Event::Progress(progress.clone()));
    }
    fn show_loading(&mut self, message: &str) {
        self.events.push(Event::Loading(message.to_string()));
    }
    fn hide_loading(&mut self) {
        self.events.push(Event::HideLoading);
    }
    fn alert(&mut self, message: &str) {
        self.events.push(Event::Alert(message.to_string()));
    }
    fn show_summary(&mut self, summary: &SummaryView) {
        self.events.push(Event::Summary(summary.clone()));
    }
    fn draw_line_chart(&mut self, chart: &LineChart) {
        self.events.push(Event::LineChart(chart.title.clone()));
    }
    fn draw_bar_chart(&mut self, chart: &BarChart) {
        self.events.push(Event::BarChart(chart.title.clone()));
    }
    fn show_miner_rows(&mut self, rows: &[MinerRow]) {
        self.events.push(Event::Rows(rows.len()));
    }
}

fn canned_result() -> SimulationResult {
    let mut scores = BTreeMap::new();
    let mut tokens = BTreeMap::new();
    for id in 0..3u32 {
        scores.insert(id, vec![0.0, 4.0, 9.0]);
        tokens.insert(id, vec![0.0, 40.0, 90.0]);
    }

    let report = |id: u32, toks: f64, byz: bool| MinerReport {
        id,
        score: 9.0,
        renewable_energy: 0.25,
        tasks_completed: 30,
        selection_count: 35,
        penalties: if byz { 12 } else { 1 },
        error_rate: if byz { 0.3 } else { 0.02 },
        tokens: toks,
        is_byzantine: byz,
        detected_byzantine: byz,
    };

    SimulationResult {
        summary: Summary {
            total_tasks: 100,
            successful_tasks: 95,
            success_rate: 0.95,
            useful_work_efficiency: 0.74,
            byzantine_count: 3,
            detected_byzantine_count: 3,
            avg_tasks_honest: 5.2,
            avg_tasks_byzantine: 1.1,
            avg_tokens_honest: 60.0,
            avg_tokens_byzantine: 4.0,
            num_verifiers: 3,
            fault_tolerance_enabled: true,
        },
        metrics: MetricsHistory {
            scores,
            tokens,
            renewable_energy: vec![0.24, 0.25, 0.25],
            success_rate: vec![0.9, 0.94, 0.95],
            useful_work_efficiency: vec![0.7, 0.73, 0.74],
        },
        miners: vec![report(1, 900.0, false), report(0, 500.0, false), report(2, 20.0, true)],
    }
}

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    submitted: Arc<std::sync::Mutex<Option<SimulationConfig>>>,
    simulate_status: StatusCode,
}

async fn mock_simulate(
    State(state): State<MockState>,
    Json(config): Json<SimulationConfig>,
) -> (StatusCode, Json<serde_json::Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.submitted.lock().unwrap() = Some(config);
    if state.simulate_status.is_success() {
        (
            state.simulate_status,
            Json(serde_json::to_value(canned_result()).unwrap()),
        )
    } else {
        (
            state.simulate_status,
            Json(serde_json::json!({"error": "engine exploded"})),
        )
    }
}

async fn spawn_service(
    simulate_status: StatusCode,
) -> (String, Arc<AtomicUsize>, Arc<std::sync::Mutex<Option<SimulationConfig>>>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let submitted = Arc::new(std::sync::Mutex::new(None));
    let state = MockState {
        hits: hits.clone(),
        submitted: submitted.clone(),
        simulate_status,
    };

    let app = Router::new()
        .route(
            "/api/config/default",
            get(|| async { Json(SimulationConfig::default()) }),
        )
        .route("/api/simulate/sync", post(mock_simulate))
        .with_state(state);

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{}", port), hits, submitted)
}

#[tokio::test]
async fn defaults_populate_the_form() {
    let (url, _, _) = spawn_service(StatusCode::OK).await;
    let mut console = SimulationConsole::new(ApiClient::new(url), RecordingSurface::default());

    console.load_defaults().await;

    assert_eq!(console.form().get(Field::NumMiners), "20");
    assert_eq!(console.form().get(Field::NumTasks), "1000");
    assert_eq!(console.form().get(Field::RenewableEnergyAlpha), "random");
    assert_eq!(console.form().get(Field::FaultToleranceEnabled), "true");
    assert_eq!(console.surface().events, vec![Event::Form]);
}

#[tokio::test]
async fn unreachable_service_degrades_silently() {
    // Nothing listens on this port; the form keeps its empty state.
    let mut console = SimulationConsole::new(
        ApiClient::new("http://127.0.0.1:9"),
        RecordingSurface::default(),
    );

    console.load_defaults().await;

    assert_eq!(console.form().get(Field::NumMiners), "");
    assert!(console.surface().events.is_empty());
}

#[tokio::test]
async fn size_validation_aborts_before_any_traffic() {
    let (url, hits, _) = spawn_service(StatusCode::OK).await;
    let mut console = SimulationConsole::new(ApiClient::new(url), RecordingSurface::default());
    console.load_defaults().await;
    console.set_field(Field::InputSizeMin, "100").unwrap();
    console.set_field(Field::InputSizeMax, "10").unwrap();

    console.run().await;

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(
        console.surface().alerts(),
        vec!["Min input size must be less than max input size"]
    );
    assert!(console.surface().controls().is_empty());
    assert!(!console.is_running());
}

#[tokio::test]
async fn parse_failure_names_the_offending_field() {
    let (url, hits, _) = spawn_service(StatusCode::OK).await;
    let mut console = SimulationConsole::new(ApiClient::new(url), RecordingSurface::default());
    console.load_defaults().await;
    console.set_field(Field::NumMiners, "lots").unwrap();

    console.run().await;

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    let alerts = console.surface().alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("num_miners"));
    assert!(alerts[0].contains("lots"));
}

#[tokio::test]
async fn successful_run_renders_the_full_sequence() {
    let (url, hits, _) = spawn_service(StatusCode::OK).await;
    let mut console = SimulationConsole::new(ApiClient::new(url), RecordingSurface::default());
    console.load_defaults().await;

    console.run().await;

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(!console.is_running());

    let events = &console.surface().events;
    assert_eq!(console.surface().controls(), vec![RunControl::Busy, RunControl::Ready]);

    let progress: Vec<&ProgressView> = events
        .iter()
        .filter_map(|e| match e {
            Event::Progress(p) => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 2);
    assert_eq!(progress[0].percentage(), 0.0);
    assert_eq!(progress[1].percentage(), 100.0);
    assert_eq!(progress[1].rate_text(), "Success Rate: 95.00%");

    let summary = events
        .iter()
        .find_map(|e| match e {
            Event::Summary(s) => Some(s),
            _ => None,
        })
        .expect("summary rendered");
    assert_eq!(summary.total_tasks, "100");
    assert_eq!(summary.successful_tasks, "95");
    assert_eq!(summary.success_rate, "95.00%");
    assert_eq!(summary.byzantine_count, "3");

    let line_titles: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            Event::LineChart(t) => Some(t.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        line_titles,
        vec![
            "Miner Scores Over Time",
            "Success Rate Over Time",
            "Renewable Energy Usage"
        ]
    );
    assert!(events.contains(&Event::BarChart("Token Distribution".to_string())));
    assert!(events.contains(&Event::Rows(3)));
}

#[tokio::test]
async fn failed_run_alerts_and_restores_the_trigger_once() {
    let (url, hits, _) = spawn_service(StatusCode::INTERNAL_SERVER_ERROR).await;
    let mut console = SimulationConsole::new(ApiClient::new(url), RecordingSurface::default());
    console.load_defaults().await;

    console.run().await;

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(!console.is_running());
    assert_eq!(console.surface().controls(), vec![RunControl::Busy, RunControl::Ready]);
    assert_eq!(
        console.surface().alerts(),
        vec!["Error running simulation. Please check the logs for details."]
    );

    let loading: Vec<&Event> = console
        .surface()
        .events
        .iter()
        .filter(|e| matches!(e, Event::Loading(_)))
        .collect();
    assert_eq!(
        loading.last(),
        Some(&&Event::Loading("Error running simulation".to_string()))
    );

    // No result was rendered.
    assert!(!console
        .surface()
        .events
        .iter()
        .any(|e| matches!(e, Event::Summary(_) | Event::Rows(_))));
}

#[tokio::test]
async fn run_config_keeps_overrides_the_form_cannot_carry() {
    let (url, _, submitted) = spawn_service(StatusCode::OK).await;
    let mut console = SimulationConsole::new(ApiClient::new(url), RecordingSurface::default());
    console.load_defaults().await;

    let config = SimulationConfig {
        seed: Some(7),
        num_verifiers: 5,
        ..SimulationConfig::default()
    };
    console.run_config(config).await;

    let sent = submitted.lock().unwrap().clone().expect("request sent");
    assert_eq!(sent.seed, Some(7));
    assert_eq!(sent.num_verifiers, 5);
}

#[tokio::test]
async fn reset_reloads_defaults_and_discards_edits() {
    let (url, _, _) = spawn_service(StatusCode::OK).await;
    let mut console = SimulationConsole::new(ApiClient::new(url), RecordingSurface::default());
    console.load_defaults().await;
    console.set_field(Field::NumMiners, "7").unwrap();
    assert_eq!(console.form().get(Field::NumMiners), "7");

    console.reset().await;

    assert_eq!(console.form().get(Field::NumMiners), "20");
}
