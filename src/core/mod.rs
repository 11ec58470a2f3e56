//! Core module - configuration, logging and persisted state

pub mod config;
pub mod logging;
pub mod onboarding;

pub use config::Config;
pub use onboarding::{OnboardingStore, Slide, StateError, ONBOARDING_KEY};
