use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

pub async fn root() -> &'static str {
    "TaskMine Simulation API v0.3"
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: "0.3.0".to_string(),
        message: "Simulation Engine Ready".to_string(),
    })
}
