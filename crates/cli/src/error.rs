use engine_config::settings::error::SettingsError;
use planner::CompileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the request file: {0}")]
    RequestRead(#[from] std::io::Error),

    #[error("Failed to parse the request file as JSON: {0}")]
    RequestParse(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid bind style provided: {0}")]
    InvalidBindStyle(String),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to compile the request: {0}")]
    Compile(#[from] CompileError),
}
