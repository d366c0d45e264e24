use crate::config::StepConfig;
use crate::error::PersistenceError;
use crate::graph::GraphSnapshot;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Version stamped on every job definition this crate produces.
pub const JOB_FORMAT_VERSION: u32 = 1;

/// A compiled job, as handed to the persistence callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDefinition {
    pub name: String,
    pub version: u32,
    pub definition: JobBody,
    pub is_active: bool,
}

/// The executable part of a job plus the raw graph it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobBody {
    pub name: String,
    pub version: u32,
    #[serde(default)]
    pub parameters: StepConfig,
    /// Executable steps, each `{ "type", "name", ...config }`.
    pub steps: Vec<StepConfig>,
    /// Untouched graph for reopening the job in the editor.
    pub flow: GraphSnapshot,
}

impl JobDefinition {
    /// Compact JSON. Identical jobs always serialize to identical bytes.
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(|e| PersistenceError::Json(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Json(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(json).map_err(|e| PersistenceError::Json(e.to_string()))
    }

    /// Writes the job as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|e| PersistenceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}
