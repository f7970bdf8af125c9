//! Typed error variants for the breakpoint-gutter-config crate.
//!
//! Callers can match on a specific failure mode instead of an opaque string.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading, saving or validating configuration.
///
/// # Example
///
/// ```rust,no_run
/// use breakpoint_gutter_config::{ConfigError, GutterConfig};
///
/// match GutterConfig::load() {
///     Ok(config) => println!("gutter: {}", config.gutter_name),
///     Err(ConfigError::Validation(msg)) => eprintln!("bad config: {msg}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error on config file '{}': {source}", path.display())]
    Io {
        /// File that was being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained YAML that could not be parsed.
    #[error("YAML parse error in config '{}': {source}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The config could not be serialized for saving.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the invalid field and why.
    #[error("config validation error: {0}")]
    Validation(String),
}
