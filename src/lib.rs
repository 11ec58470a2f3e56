//! BizConnect: multi-step business forms
//!
//! A wizard engine (typed field store, per-step validation, gated
//! navigation, simulated submission) with the platform's registration,
//! project, checkout, contact and feedback forms, plus a vendor catalog
//! and the `bizc` command line.

pub mod assets;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod forms;
pub mod render;
pub mod wizard;
