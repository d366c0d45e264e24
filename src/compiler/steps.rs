use crate::config::StepConfig;
use crate::graph::FlowNode;
use serde_json::Value;

/// Builds the executable step for one node: `{ "type", "name", ...config }`.
///
/// Configuration keys are spread after `name`, so a `name` entry in the
/// configuration overrides the display name. `type` always comes from the
/// node's step type and cannot be overridden.
pub(super) fn emit_step(node: &FlowNode) -> StepConfig {
    let mut step = StepConfig::new();
    step.insert("type".to_string(), Value::String(node.step_type.clone()));
    step.insert("name".to_string(), Value::String(step_name(node)));
    for (key, value) in &node.config {
        if key == "type" {
            continue;
        }
        step.insert(key.clone(), value.clone());
    }
    step
}

/// Display name, or the step type when the display name is blank.
fn step_name(node: &FlowNode) -> String {
    let display = node.display_name.trim();
    if display.is_empty() {
        node.step_type.clone()
    } else {
        display.to_string()
    }
}
