//! First-run onboarding: slides and the persisted "seen" flag
//!
//! The flag is the only state that survives between runs. It lives in
//! `state.yaml` inside the state directory under a single fixed key.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::assets::asset_str;

/// Key recorded in the state file once onboarding has been shown
pub const ONBOARDING_KEY: &str = "bizconnect_onboarding_complete";

const STATE_FILE: &str = "state.yaml";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("No state directory available; set BIZC_STATE_DIR")]
    NoStateDir,

    #[error("Failed to access {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Invalid state file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StateFile {
    #[serde(rename = "bizconnect_onboarding_complete", default)]
    onboarding_complete: bool,
}

/// Reads the onboarding flag once and writes it back on change
#[derive(Debug)]
pub struct OnboardingStore {
    path: PathBuf,
    seen: bool,
}

impl OnboardingStore {
    /// Open the store in `dir`, reading the flag immediately
    pub fn open(dir: &Path) -> Result<Self, StateError> {
        let path = dir.join(STATE_FILE);
        let seen = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| StateError::Io {
                path: path.clone(),
                message: e.to_string(),
            })?;
            if content.trim().is_empty() {
                false
            } else {
                serde_yml::from_str::<StateFile>(&content)
                    .map_err(|e| StateError::Parse {
                        path: path.clone(),
                        message: e.to_string(),
                    })?
                    .onboarding_complete
            }
        } else {
            false
        };
        debug!(path = %path.display(), seen, "loaded onboarding state");
        Ok(Self { path, seen })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_seen(&self) -> bool {
        self.seen
    }

    /// Record that onboarding was completed or skipped
    pub fn mark_seen(&mut self) -> Result<(), StateError> {
        self.write(true)?;
        self.seen = true;
        Ok(())
    }

    /// Forget the flag so onboarding shows again
    pub fn reset(&mut self) -> Result<(), StateError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| StateError::Io {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        }
        self.seen = false;
        Ok(())
    }

    fn write(&self, complete: bool) -> Result<(), StateError> {
        let io_err = |e: std::io::Error| StateError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_yml::to_string(&StateFile {
            onboarding_complete: complete,
        })
        .map_err(|e| StateError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(io_err)
    }
}

/// One onboarding slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub description: String,
}

/// The bundled onboarding slides
pub fn slides() -> Vec<Slide> {
    asset_str("onboarding.yaml")
        .and_then(|content| serde_yml::from_str(&content).ok())
        .unwrap_or_default()
}
