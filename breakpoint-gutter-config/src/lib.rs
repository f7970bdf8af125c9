//! Configuration for the breakpoint gutter controller.
//!
//! This crate provides configuration loading, saving, validation and default
//! values for the gutter controller and the scenario simulator. It includes:
//!
//! - `GutterConfig`: gutter naming, priority, decoration classes and gesture switches
//! - `LogLevel`: default log verbosity for the simulator binary
//! - YAML persistence with XDG-style path resolution

pub mod config;
pub mod defaults;
mod error;
mod types;

pub use config::{GutterConfig, LINE_NUMBER_GUTTER_PRIORITY};
pub use error::ConfigError;
pub use types::LogLevel;
