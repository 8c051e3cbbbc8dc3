//! Run configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{InvalidStationName, StationName};
use crate::network::Boundaries;

/// Errors loading or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// A boundary station name failed validation
    #[error("invalid boundary station: {0}")]
    Boundary(#[from] InvalidStationName),
}

/// Settings for one accounting run.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountingConfig {
    /// Sentinel leaf for hand-off to administration A.
    pub boundary_a: String,

    /// Sentinel leaf for hand-off to administration F.
    pub boundary_f: String,

    /// Parent token that marks the root in the topology file.
    pub root_marker: String,
}

impl AccountingConfig {
    pub fn new(boundary_a: &str, boundary_f: &str, root_marker: &str) -> Self {
        Self {
            boundary_a: boundary_a.to_string(),
            boundary_f: boundary_f.to_string(),
            root_marker: root_marker.to_string(),
        }
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The boundary sentinels as validated names.
    pub fn boundaries(&self) -> Result<Boundaries, ConfigError> {
        Ok(Boundaries {
            to_a: StationName::parse(&self.boundary_a)?,
            to_f: StationName::parse(&self.boundary_f)?,
        })
    }
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            boundary_a: "N".to_string(),
            boundary_f: "O".to_string(),
            root_marker: "None".to_string(),
        }
    }
}
