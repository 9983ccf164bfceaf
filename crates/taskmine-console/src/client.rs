use reqwest::Client;
use taskmine_protocol::{SimulationConfig, SimulationResult};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Thin wrapper over the two service endpoints the console consumes. Any
/// non-2xx status is a plain failure; the body is not inspected.
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base: base.into(),
        }
    }

    pub async fn default_config(&self) -> ClientResult<SimulationConfig> {
        let resp = self
            .http
            .get(format!("{}/api/config/default", self.base))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }
        Ok(serde_json::from_str(&resp.text().await?)?)
    }

    pub async fn run_simulation(&self, config: &SimulationConfig) -> ClientResult<SimulationResult> {
        let resp = self
            .http
            .post(format!("{}/api/simulate/sync", self.base))
            .json(config)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }
        Ok(serde_json::from_str(&resp.text().await?)?)
    }
}
