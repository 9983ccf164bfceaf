use taskmine_core::wire::SimulationConfig;

/// Shared handler state. The service is stateless beyond the default
/// configuration template it publishes; every run owns its own engine.
#[derive(Clone, Default)]
pub struct AppState {
    pub defaults: SimulationConfig,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            defaults: SimulationConfig::default(),
        }
    }
}
