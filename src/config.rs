use crate::error::PersistenceError;
use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Opaque, ordered step configuration.
///
/// Keys keep their insertion order (serde_json is built with `preserve_order`),
/// which keeps compiled output stable. Values are never schema-checked here.
pub type StepConfig = serde_json::Map<String, serde_json::Value>;

/// Lower bound for the viewport scale.
pub const MIN_SCALE: f64 = 0.1;
/// Upper bound for the viewport scale.
pub const MAX_SCALE: f64 = 3.0;

/// Tunable editor geometry and input behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Size given to every newly placed node, in virtual units.
    pub default_node_size: Size,
    /// Vertical distance between neighbouring ports on one side of a node.
    pub port_spacing: f64,
    /// Drawn radius of a port.
    pub port_radius: f64,
    /// Pointer distance (virtual units) within which a port counts as hit.
    pub port_hit_radius: f64,
    /// Where the start node lands when it is auto-inserted.
    pub start_node_position: Point,
    /// Multiplicative zoom step applied per wheel notch.
    pub wheel_zoom_step: f64,
    /// Screen padding kept around the nodes by zoom-to-fit.
    pub fit_padding: f64,
    /// Bezier handle length as a fraction of the horizontal span of a connection.
    pub curve_tension: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_node_size: Size::new(180.0, 72.0),
            port_spacing: 20.0,
            port_radius: 6.0,
            port_hit_radius: 8.0,
            start_node_position: Point::new(100.0, 200.0),
            wheel_zoom_step: 1.1,
            fit_padding: 50.0,
            curve_tension: 0.5,
        }
    }
}

impl EditorSettings {
    /// Load settings from a JSON file. Missing fields fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(json).map_err(|e| PersistenceError::Json(e.to_string()))
    }
}
