//! # repo-admin-core
//!
//! Core types for the repo-admin framework. This crate has no web framework
//! dependencies and provides the foundation the panel and test crates build on.
//!
//! ## Modules
//!
//! - [`error`] - The [`AdminError`] taxonomy and result alias
//! - [`settings`] - Framework settings with defaults
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{AdminError, AdminResult};
pub use settings::Settings;
