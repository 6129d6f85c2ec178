use thiserror::Error;

#[derive(Debug, Error)]
pub enum SharescopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scan session not found: {0}")]
    SessionNotFound(i64),

    #[error("Share not found: {0}")]
    ShareNotFound(i64),

    #[error("Pattern not found: {0}")]
    PatternNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
