//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::forms::FormKind;

/// Toolkit configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Simulated submission delay in milliseconds (overrides per-form defaults)
    pub submit_delay_ms: Option<u64>,

    /// Directory holding persisted state (the onboarding flag)
    pub state_dir: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/bizconnect/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        if let Ok(delay) = std::env::var("BIZC_SUBMIT_DELAY_MS") {
            match delay.trim().parse() {
                Ok(ms) => config.submit_delay_ms = Some(ms),
                Err(_) => warn!(value = %delay, "ignoring invalid BIZC_SUBMIT_DELAY_MS"),
            }
        }
        if let Ok(dir) = std::env::var("BIZC_STATE_DIR") {
            config.state_dir = Some(PathBuf::from(dir));
        }
        if let Ok(format) = std::env::var("BIZC_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config file");
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "bizconnect")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.submit_delay_ms.is_some() {
            self.submit_delay_ms = other.submit_delay_ms;
        }
        if other.state_dir.is_some() {
            self.state_dir = other.state_dir;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Submission delay for a form, honouring the configured override
    pub fn submit_delay(&self, form: FormKind) -> Duration {
        self.submit_delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| form.default_submit_delay())
    }

    /// Directory for persisted state, falling back to the platform data dir
    pub fn state_dir(&self) -> Option<PathBuf> {
        self.state_dir.clone().or_else(|| {
            directories::ProjectDirs::from("", "", "bizconnect")
                .map(|dirs| dirs.data_local_dir().to_path_buf())
        })
    }
}
