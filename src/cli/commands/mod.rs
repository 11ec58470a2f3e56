//! Command implementations

pub mod completions;
pub mod config;
pub mod form;
pub mod forms;
pub mod onboarding;
pub mod vendors;
