use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
