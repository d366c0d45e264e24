use crate::config::StepConfig;
use serde::{Deserialize, Serialize};

/// Reserved step type of the graph entry point.
pub const START_STEP_TYPE: &str = "flow.start";
/// Reserved step type of the optional graph terminator.
pub const END_STEP_TYPE: &str = "flow.end";

/// Returns true for the marker step types that never become executable steps.
pub fn is_marker_step(step_type: &str) -> bool {
    step_type == START_STEP_TYPE || step_type == END_STEP_TYPE
}

/// An immutable catalog entry describing one kind of step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub template_id: String,
    pub display_name: String,
    pub step_type: String,
    pub category: String,
    pub library: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: String,
    pub input_port_count: u32,
    pub output_port_count: u32,
    /// Copied into each new node; never shared with it.
    pub default_config: StepConfig,
}

impl NodeTemplate {
    pub fn is_start(&self) -> bool {
        self.step_type == START_STEP_TYPE
    }
}

fn default_port_count() -> u32 {
    1
}

/// Wire form of a step definition as returned by the catalog service.
///
/// Accepts both the snake_case and camelCase spellings of each field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", alias = "step_type", alias = "stepType")]
    pub step_type: String,
    #[serde(default, alias = "displayName", alias = "display_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub library: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(
        default = "default_port_count",
        alias = "inputPorts",
        alias = "inputs"
    )]
    pub input_ports: u32,
    #[serde(
        default = "default_port_count",
        alias = "outputPorts",
        alias = "outputs"
    )]
    pub output_ports: u32,
    #[serde(default, alias = "defaultConfig")]
    pub default_config: StepConfig,
}

/// Response envelope of the catalog service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepListResponse {
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

impl From<StepDefinition> for NodeTemplate {
    fn from(def: StepDefinition) -> Self {
        let template_id = def.id.unwrap_or_else(|| def.step_type.clone());
        let display_name = def.name.unwrap_or_else(|| def.step_type.clone());
        NodeTemplate {
            template_id,
            display_name,
            step_type: def.step_type,
            category: def.category,
            library: def.library,
            icon: def.icon,
            color: def.color,
            description: def.description,
            input_port_count: def.input_ports,
            output_port_count: def.output_ports,
            default_config: def.default_config,
        }
    }
}
