//! Process-wide compiler settings.
//!
//! Settings are layered: built-in defaults, then an optional JSON settings
//! file, then environment variables (including those read from a `.env`
//! file). The result is validated into [`CompileLimits`].

use crate::settings::{env::EnvManager, error::SettingsError, validator::SettingsValidator};
use lazy_static::lazy_static;
use model::pagination::limits::CompileLimits;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, str::FromStr};
use tracing::{info, warn};

pub mod env;
pub mod error;
pub mod validator;

pub const ENV_DEFAULT_PAGE_SIZE: &str = "SIEVE_DEFAULT_PAGE_SIZE";
pub const ENV_MAX_PAGE_SIZE: &str = "SIEVE_MAX_PAGE_SIZE";
pub const ENV_MAX_FILTER_DEPTH: &str = "SIEVE_MAX_FILTER_DEPTH";
pub const ENV_SETTINGS_FILE: &str = "SIEVE_SETTINGS_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub max_filter_depth: usize,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        let limits = CompileLimits::default();
        Self {
            default_page_size: limits.default_page_size,
            max_page_size: limits.max_page_size,
            max_filter_depth: limits.max_filter_depth,
        }
    }
}

impl CompilerSettings {
    /// Reads a JSON settings file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Overrides fields from `SIEVE_*` variables present in `env`.
    pub fn apply_env(&mut self, env: &EnvManager) -> Result<(), SettingsError> {
        if let Some(v) = parse_env(env, ENV_DEFAULT_PAGE_SIZE)? {
            self.default_page_size = v;
        }
        if let Some(v) = parse_env(env, ENV_MAX_PAGE_SIZE)? {
            self.max_page_size = v;
        }
        if let Some(v) = parse_env(env, ENV_MAX_FILTER_DEPTH)? {
            self.max_filter_depth = v;
        }
        Ok(())
    }

    /// Layers defaults, the settings file and the environment.
    ///
    /// When `settings_file` is `None`, `SIEVE_SETTINGS_FILE` is consulted.
    pub fn load(
        settings_file: Option<&Path>,
        env_file: Option<&Path>,
    ) -> Result<Self, SettingsError> {
        let mut env = EnvManager::new();
        if let Some(path) = env_file {
            env.load_from_file(path)?;
        }
        Self::load_with_env(settings_file, &env)
    }

    pub fn load_with_env(
        settings_file: Option<&Path>,
        env: &EnvManager,
    ) -> Result<Self, SettingsError> {
        let file = settings_file
            .map(Path::to_path_buf)
            .or_else(|| env.get(ENV_SETTINGS_FILE).map(Into::into));

        let mut settings = match file {
            Some(path) => {
                info!("Loading compiler settings from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        settings.apply_env(env)?;
        Ok(settings)
    }

    pub fn limits(&self) -> Result<CompileLimits, SettingsError> {
        SettingsValidator::new(self).validate()
    }
}

fn parse_env<T: FromStr>(env: &EnvManager, key: &str) -> Result<Option<T>, SettingsError> {
    match env.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| SettingsError::InvalidEnvValue {
                key: key.to_string(),
                value: raw.to_string(),
            }),
    }
}

lazy_static! {
    static ref GLOBAL_LIMITS: CompileLimits = load_global_limits();
}

fn load_global_limits() -> CompileLimits {
    match CompilerSettings::load(None, None).and_then(|s| s.limits()) {
        Ok(limits) => limits,
        Err(err) => {
            warn!("Falling back to default compile limits: {err}");
            CompileLimits::default()
        }
    }
}

/// Process-wide limits, loaded once from the environment on first use.
pub fn global_limits() -> CompileLimits {
    *GLOBAL_LIMITS
}
