//! Error types for the footprint wizard.
//!
//! Generators and lookups return [`FpwError`]. Design rule violations are not
//! errors; they are reported as data by [`crate::drc::check`].

use std::path::PathBuf;

use thiserror::Error;

use crate::params::PackageFamily;

/// Result type for footprint wizard operations.
pub type FpwResult<T> = Result<T, FpwError>;

/// Errors that can occur while generating or persisting a footprint.
#[derive(Error, Debug)]
pub enum FpwError {
    /// The units field is missing or not a recognised unit.
    #[error("invalid units: no length unit selected")]
    InvalidUnits,

    /// A dual-row distance does not select exactly one of center/inner/outer.
    #[error("invalid distance mode on {axis} axis: exactly one of center, inner or outer must be set")]
    InvalidDistanceMode {
        /// Axis the distance applies to ("x" or "y").
        axis: char,
    },

    /// The family has no layout for this number of pins.
    #[error("{family} footprints with {pins} pins are not implemented")]
    UnsupportedPinCount {
        /// Package family.
        family: PackageFamily,
        /// Requested number of pins.
        pins: u32,
    },

    /// The default library has no entry for the identifier.
    #[error("no default values found for footprint type: {catalog_id}")]
    MissingDefaultValues {
        /// Catalog identifier that was looked up.
        catalog_id: String,
    },

    /// A parameter value is outside what the generator can lay out.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of what's wrong.
        message: String,
    },

    /// Parameter file carries a version this build does not understand.
    #[error("unsupported parameter file version: {version}")]
    UnsupportedVersion {
        /// Version found in the file.
        version: u32,
    },

    /// Failed to read a file.
    #[error("failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A parameter file could not be parsed.
    #[error("failed to parse parameter file: {path}")]
    Parse {
        /// Path to the parameter file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl FpwError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported pin count error.
    #[must_use]
    pub const fn unsupported_pin_count(family: PackageFamily, pins: u32) -> Self {
        Self::UnsupportedPinCount { family, pins }
    }
}

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}
