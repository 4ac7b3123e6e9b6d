//! `global.json` pin files.
//!
//! A project pins its SDK with a `global.json` in the project directory or
//! any parent:
//!
//! ```json
//! { "sdk": { "version": "6.0.100" } }
//! ```
//!
//! A `global.json` without an `sdk.version` (for example one that only lists
//! `msbuild-sdks`) does not pin anything.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::LocatorError;

/// Name of the pin file.
pub const PIN_FILE_NAME: &str = "global.json";

/// A parsed pin file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinFile {
    pub path: PathBuf,
    /// The pinned SDK version, if the file pins one
    pub sdk_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPinFile {
    #[serde(default)]
    sdk: Option<RawSdkPin>,
}

#[derive(Debug, Deserialize)]
struct RawSdkPin {
    #[serde(default)]
    version: Option<String>,
}

impl PinFile {
    /// Load and parse a pin file.
    pub fn load(path: &Path) -> Result<Self, LocatorError> {
        let content = std::fs::read_to_string(path).map_err(|source| LocatorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, LocatorError> {
        let raw: RawPinFile =
            serde_json::from_str(content).map_err(|e| LocatorError::InvalidPinFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let sdk_version = raw
            .sdk
            .and_then(|sdk| sdk.version)
            .map(|v| v.trim().to_string());

        if sdk_version.as_deref() == Some("") {
            return Err(LocatorError::InvalidPinFile {
                path: path.to_path_buf(),
                message: "`sdk.version` is empty".to_string(),
            });
        }

        Ok(PinFile {
            path: path.to_path_buf(),
            sdk_version,
        })
    }
}

/// Find the nearest pin file, starting from a project/solution path and
/// searching upward.
pub fn find_pin_file(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_dir() {
        start.to_path_buf()
    } else {
        start.parent()?.to_path_buf()
    };

    loop {
        let candidate = current.join(PIN_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
