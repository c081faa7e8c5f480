use thiserror::Error;

/// The main error type for taskdir operations
#[derive(Debug, Error)]
pub enum TaskdirError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task error: {0}")]
    Task(String),

    #[error("Path error: {0}")]
    Path(String),
}

/// Result type alias for taskdir operations
pub type TaskdirResult<T> = Result<T, TaskdirError>;
