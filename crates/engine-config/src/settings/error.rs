use thiserror::Error;

/// Errors raised while loading or validating compiler settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings or env file could not be read.
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for `CompilerSettings`.
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A line in an env file is not `KEY=VALUE`.
    #[error("Invalid env file: {0}")]
    EnvFile(String),

    /// An environment variable holds something other than a positive integer.
    #[error("Invalid value for {key}: '{value}' is not a valid number")]
    InvalidEnvValue { key: String, value: String },

    /// One or more limits are inconsistent.
    #[error("Settings validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}
