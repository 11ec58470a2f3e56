//! Shared helper functions for CLI commands

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};

use crate::core::{Config, StateError};

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Text progress bar for a percentage, e.g. `[######--------------] 30%`
pub fn progress_bar(percent: f64, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

/// The state directory, or an error telling the user how to set one
pub fn require_state_dir(config: &Config) -> Result<PathBuf> {
    config.state_dir().ok_or(StateError::NoStateDir).into_diagnostic()
}
