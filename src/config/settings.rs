//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::params::{Attributes, ParameterModel};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Attribute values used where a parameter file leaves them empty.
    #[serde(default)]
    pub attributes: Attributes,

    /// Design rule check settings.
    #[serde(default)]
    pub drc: DrcConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Fills empty attribute fields of `params` with the configured defaults.
    ///
    /// Models without an attribute block are left alone.
    pub fn apply_attributes(&self, params: &mut ParameterModel) {
        let Some(attributes) = params.attributes.as_mut() else {
            return;
        };
        let defaults = &self.attributes;
        for (field, default) in [
            (&mut attributes.author, &defaults.author),
            (&mut attributes.dist_license, &defaults.dist_license),
            (&mut attributes.use_license, &defaults.use_license),
            (&mut attributes.status, &defaults.status),
        ] {
            if field.is_empty() {
                field.clone_from(default);
            }
        }
    }
}

/// Design rule check configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrcConfig {
    /// Refuse to write footprints that fail the design rule check.
    #[serde(default)]
    pub strict: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PackageFamily;
    use crate::units::Units;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.drc.strict);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "logging": {
                "level": "debug"
            },
            "attributes": {
                "author": "A. Designer",
                "dist_license": "GPL",
                "use_license": "unlimited",
                "status": "experimental"
            },
            "drc": {
                "strict": true
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.attributes.author, "A. Designer");
        assert_eq!(config.attributes.status, "experimental");
        assert!(config.drc.strict);
    }

    #[test]
    fn reject_invalid_level() {
        let json = r#"{ "logging": { "level": "loud" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn attributes_fill_only_empty_fields() {
        let config: Config = serde_json::from_str(
            r#"{ "attributes": { "author": "Config Author", "status": "stable" } }"#,
        )
        .unwrap();

        let mut params = ParameterModel::new(PackageFamily::Dip, Units::Mil);
        params.attributes = Some(Attributes {
            status: "experimental".to_string(),
            ..Attributes::default()
        });
        config.apply_attributes(&mut params);
        let attributes = params.attributes.unwrap();
        assert_eq!(attributes.author, "Config Author");
        assert_eq!(attributes.status, "experimental");

        let mut bare = ParameterModel::new(PackageFamily::Dip, Units::Mil);
        config.apply_attributes(&mut bare);
        assert!(bare.attributes.is_none());
    }
}
