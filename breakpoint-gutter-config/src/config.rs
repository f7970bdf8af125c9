//! `GutterConfig`: settings for one breakpoint gutter controller, plus YAML
//! persistence and validation.

use crate::error::ConfigError;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Priority of the host's line-number gutter. The breakpoint gutter must sort
/// after it so it renders between the line numbers and the code.
pub const LINE_NUMBER_GUTTER_PRIORITY: i32 = 0;

/// Settings controlling the breakpoint gutter and its pointer gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GutterConfig {
    /// Name of the gutter created for breakpoint markers
    #[serde(default = "crate::defaults::gutter_name")]
    pub gutter_name: String,

    /// Name of the host's line-number gutter, which also accepts breakpoint clicks
    #[serde(default = "crate::defaults::line_number_gutter_name")]
    pub line_number_gutter_name: String,

    /// Rendering priority of the breakpoint gutter (must exceed the line-number gutter's)
    #[serde(default = "crate::defaults::priority")]
    pub priority: i32,

    /// Decoration class applied to committed breakpoint markers
    #[serde(default = "crate::defaults::breakpoint_class")]
    pub breakpoint_class: String,

    /// Decoration class applied to the hover preview marker
    #[serde(default = "crate::defaults::shadow_class")]
    pub shadow_class: String,

    /// Show a shadow marker under the pointer while hovering the gutter
    #[serde(default = "crate::defaults::bool_true")]
    pub hover_preview: bool,

    /// Also accept hover and click gestures on the line-number gutter
    #[serde(default = "crate::defaults::bool_true")]
    pub line_number_gutter_clicks: bool,

    /// Column at which breakpoint markers are anchored
    #[serde(default = "crate::defaults::zero")]
    pub marker_column: u32,

    /// Default log level for the simulator's debug log
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            gutter_name: crate::defaults::gutter_name(),
            line_number_gutter_name: crate::defaults::line_number_gutter_name(),
            priority: crate::defaults::priority(),
            breakpoint_class: crate::defaults::breakpoint_class(),
            shadow_class: crate::defaults::shadow_class(),
            hover_preview: crate::defaults::bool_true(),
            line_number_gutter_clicks: crate::defaults::bool_true(),
            marker_column: crate::defaults::zero(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl GutterConfig {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists.
    ///
    /// Unlike [`GutterConfig::load_from`], a missing file is not an error and
    /// nothing is written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific YAML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// Writes to a temp file first and renames it into place so a crash never
    /// leaves a truncated config behind.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;
        Ok(())
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("breakpoint-gutter").join("config.yaml")
            } else {
                PathBuf::from("config.yaml")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join("breakpoint-gutter")
                    .join("config.yaml")
            } else {
                PathBuf::from("config.yaml")
            }
        }
    }

    /// Check field values that serde alone cannot enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gutter_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gutter_name must not be empty".to_string(),
            ));
        }
        if self.gutter_name == self.line_number_gutter_name {
            return Err(ConfigError::Validation(format!(
                "gutter_name '{}' collides with the line-number gutter",
                self.gutter_name
            )));
        }
        if self.priority <= LINE_NUMBER_GUTTER_PRIORITY {
            return Err(ConfigError::Validation(format!(
                "priority {} must be greater than the line-number gutter priority {}",
                self.priority, LINE_NUMBER_GUTTER_PRIORITY
            )));
        }
        if self.breakpoint_class.is_empty() || self.shadow_class.is_empty() {
            return Err(ConfigError::Validation(
                "decoration classes must not be empty".to_string(),
            ));
        }
        if self.breakpoint_class == self.shadow_class {
            return Err(ConfigError::Validation(
                "breakpoint_class and shadow_class must differ".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = GutterConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.priority > LINE_NUMBER_GUTTER_PRIORITY);
        assert!(config.hover_preview);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: GutterConfig = serde_yaml_ng::from_str("priority: 250\n").unwrap();
        assert_eq!(config.priority, 250);
        assert_eq!(config.gutter_name, "debugger-breakpoint");
        assert_eq!(config.line_number_gutter_name, "line-number");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_save_and_load_from() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("config.yaml");

        let config = GutterConfig {
            hover_preview: false,
            log_level: LogLevel::Debug,
            ..GutterConfig::default()
        };
        config.save_to(&path).expect("save failed");
        assert!(!path.with_extension("yaml.tmp").exists());

        let loaded = GutterConfig::load_from(&path).expect("load failed");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = GutterConfig::load_from(&temp_dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_invalid_yaml_is_parse_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "priority: [not, a, number]\n").unwrap();
        let err = GutterConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_priority_must_follow_line_numbers() {
        let config = GutterConfig {
            priority: 0,
            ..GutterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_gutter_name_collision_rejected() {
        let config = GutterConfig {
            gutter_name: "line-number".to_string(),
            ..GutterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_identical_classes_rejected() {
        let config = GutterConfig {
            shadow_class: crate::defaults::breakpoint_class(),
            ..GutterConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
