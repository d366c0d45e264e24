use crate::catalog::{NodeTemplate, START_STEP_TYPE};
use crate::config::StepConfig;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node, unique within its graph and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of generated ids (`node-17` -> 17).
    pub(crate) fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix("node-")?.parse().ok()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One placed step on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: NodeId,
    pub step_type: String,
    pub display_name: String,
    /// Top-left corner in virtual units.
    pub position: Point,
    pub size: Size,
    pub config: StepConfig,
    pub input_port_count: u32,
    pub output_port_count: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub library: String,
}

impl FlowNode {
    /// Instantiates `template` at `position`. The default configuration is
    /// cloned so later edits never leak back into the template.
    pub(crate) fn from_template(
        id: NodeId,
        template: &NodeTemplate,
        position: Point,
        size: Size,
    ) -> Self {
        Self {
            id,
            step_type: template.step_type.clone(),
            display_name: template.display_name.clone(),
            position: position.clamp_non_negative(),
            size,
            config: template.default_config.clone(),
            input_port_count: template.input_port_count,
            output_port_count: template.output_port_count,
            category: template.category.clone(),
            library: template.library.clone(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn is_start(&self) -> bool {
        self.step_type == START_STEP_TYPE
    }
}
