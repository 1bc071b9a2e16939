//! `aam` configuration.
//!
//! Read from `--config <PATH>` when given, otherwise from the platform config
//! directory:
//! - Linux: ~/.config/aam/config.toml
//! - macOS: ~/Library/Application Support/aam/config.toml
//! - Windows: %APPDATA%/aam/config/config.toml
//!
//! `AAM_API_ENDPOINT` overrides the endpoint from either source.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use aam_core::{DEFAULT_ALPHA, DEFAULT_EXPERIMENT_NAME, SessionSettings};
use aam_model::OptimizationMode;

pub const API_ENDPOINT_ENV: &str = "AAM_API_ENDPOINT";
pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:5000";

const APP_NAME: &str = "aam";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AamConfig {
    /// Base URL of the analysis service.
    pub api_endpoint: String,
    pub default_alpha: f64,
    /// Quiet time before typed alpha text is committed.
    pub alpha_debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub default_experiment_name: String,
    pub optimization_mode: OptimizationMode,
}

impl Default for AamConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            default_alpha: DEFAULT_ALPHA,
            alpha_debounce_ms: 500,
            request_timeout_secs: 30,
            default_experiment_name: DEFAULT_EXPERIMENT_NAME.to_string(),
            optimization_mode: OptimizationMode::default(),
        }
    }
}

impl AamConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            default_alpha: self.default_alpha,
            default_experiment_name: self.default_experiment_name.clone(),
            optimization_mode: self.optimization_mode,
            alpha_debounce: Duration::from_millis(self.alpha_debounce_ms),
        }
    }

    /// Replace the endpoint with a non-blank override.
    #[must_use]
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) {
            self.api_endpoint = endpoint.trim().to_string();
        }
        self
    }
}

/// Platform location of the config file, if one can be determined.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

pub fn parse_config(content: &str) -> Result<AamConfig> {
    toml::from_str(content).context("parse config")
}

/// Load the configuration and apply the environment override.
///
/// An explicit path must exist and parse. The platform file is optional;
/// when it is missing or malformed the defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<AamConfig> {
    let config = match explicit {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("load config: {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded config");
            config
        }
        None => load_platform_config(),
    };
    Ok(config.with_endpoint_override(std::env::var(API_ENDPOINT_ENV).ok()))
}

fn load_platform_config() -> AamConfig {
    let Some(path) = config_path() else {
        tracing::debug!("no platform config directory, using defaults");
        return AamConfig::default();
    };
    match fs::read_to_string(&path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), "{error:#}, using defaults");
                AamConfig::default()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            AamConfig::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), "failed to read config: {error}, using defaults");
            AamConfig::default()
        }
    }
}
