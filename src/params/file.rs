//! Versioned parameter files.
//!
//! A parameter file is a JSON object holding the [`ParameterModel`] fields by
//! name plus a `version` key:
//!
//! ```json
//! {
//!   "version": 1,
//!   "package_family": "DIP",
//!   "units": "mil",
//!   "number_of_pins": 8
//! }
//! ```
//!
//! Fields that are left out take their defaults.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::ParameterModel;
use crate::error::{FpwError, FpwResult};

/// Parameter file version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// Parses parameter file contents.
///
/// A missing `version` key is read as the current version.
///
/// # Errors
///
/// Returns [`ParseFailure::Version`] for a newer or unknown version and
/// [`ParseFailure::Json`] for malformed contents.
pub fn from_json(contents: &str) -> Result<ParameterModel, ParseFailure> {
    let mut value: Value = serde_json::from_str(contents)?;

    if let Some(object) = value.as_object_mut() {
        if let Some(version) = object.remove("version") {
            let version = version
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(u32::MAX);
            if version != CURRENT_VERSION {
                return Err(ParseFailure::Version(version));
            }
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Serialises a parameter model with the current version.
///
/// # Errors
///
/// Returns a JSON error if a value cannot be represented (e.g. a non-finite length).
pub fn to_json(params: &ParameterModel) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(params)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("version".to_string(), Value::from(CURRENT_VERSION));
    }
    serde_json::to_string_pretty(&value)
}

/// Why parameter file contents could not be parsed.
#[derive(Error, Debug)]
pub enum ParseFailure {
    /// Malformed JSON or a field with the wrong type.
    #[error("invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Unsupported `version` value.
    #[error("unsupported parameter file version {0}")]
    Version(u32),
}

/// Loads a parameter file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> FpwResult<ParameterModel> {
    let contents = std::fs::read_to_string(path).map_err(|e| FpwError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let params = from_json(&contents).map_err(|failure| match failure {
        ParseFailure::Json(source) => FpwError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Version(version) => FpwError::UnsupportedVersion { version },
    })?;

    debug!(
        path = %path.display(),
        family = %params.package_family,
        "Loaded parameter file"
    );
    Ok(params)
}

/// Writes a parameter file to disk.
///
/// # Errors
///
/// Returns an error if the model cannot be serialised or the file cannot be written.
pub fn save(path: &Path, params: &ParameterModel) -> FpwResult<()> {
    let contents = to_json(params).map_err(|e| FpwError::invalid_parameter("parameters", e.to_string()))?;
    std::fs::write(path, contents + "\n").map_err(|e| FpwError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
