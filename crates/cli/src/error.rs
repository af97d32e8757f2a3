use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Query error: {0}")]
    Query(#[from] query::Error),

    #[error("Invalid filter JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
