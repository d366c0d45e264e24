//! Common test utilities for building catalogs, graphs and input events.
use kumitate::catalog::StepDefinition;
use kumitate::layout::{PortKind, PortLayout};
use kumitate::prelude::*;
use serde_json::json;

fn definition(value: serde_json::Value) -> StepDefinition {
    serde_json::from_value(value).expect("fixture step definition must parse")
}

/// The graph entry point: no inputs, one output.
#[allow(dead_code)]
pub fn start_definition() -> StepDefinition {
    definition(json!({
        "id": "flow.start",
        "type": "flow.start",
        "name": "Start",
        "category": "Flow",
        "library": "core",
        "description": "Entry point of the job",
        "inputPorts": 0,
        "outputPorts": 1
    }))
}

#[allow(dead_code)]
pub fn end_definition() -> StepDefinition {
    definition(json!({
        "id": "flow.end",
        "type": "flow.end",
        "name": "End",
        "category": "Flow",
        "library": "core",
        "inputPorts": 1,
        "outputPorts": 0
    }))
}

/// One input, one output, with a default configuration.
#[allow(dead_code)]
pub fn http_definition() -> StepDefinition {
    definition(json!({
        "id": "http.request",
        "type": "http.request",
        "name": "http.request",
        "category": "Network",
        "library": "core",
        "description": "Send an HTTP request",
        "defaultConfig": { "url": "https://example.com", "method": "GET" }
    }))
}

/// Two inputs and two outputs, from a second library.
#[allow(dead_code)]
pub fn transform_definition() -> StepDefinition {
    definition(json!({
        "id": "data.transform",
        "type": "data.transform",
        "name": "Transform",
        "category": "Data",
        "library": "data-tools",
        "description": "Reshape JSON payloads",
        "inputPorts": 2,
        "outputPorts": 2,
        "defaultConfig": { "expression": "$" }
    }))
}

#[allow(dead_code)]
pub fn sample_definitions() -> Vec<StepDefinition> {
    vec![
        start_definition(),
        http_definition(),
        transform_definition(),
        end_definition(),
    ]
}

#[allow(dead_code)]
pub fn start_template() -> NodeTemplate {
    NodeTemplate::from(start_definition())
}

#[allow(dead_code)]
pub fn http_template() -> NodeTemplate {
    NodeTemplate::from(http_definition())
}

#[allow(dead_code)]
pub fn transform_template() -> NodeTemplate {
    NodeTemplate::from(transform_definition())
}

#[allow(dead_code)]
pub fn end_template() -> NodeTemplate {
    NodeTemplate::from(end_definition())
}

#[allow(dead_code)]
pub fn sample_templates() -> Vec<NodeTemplate> {
    sample_definitions()
        .into_iter()
        .map(NodeTemplate::from)
        .collect()
}

/// Start node at (100, 200) wired into an HTTP step at (300, 250).
#[allow(dead_code)]
pub fn start_to_http_graph() -> (Graph, NodeId, NodeId) {
    let mut graph = Graph::new();
    let start = graph.add_node(&start_template(), Point::new(100.0, 200.0));
    let http = graph.add_node(&http_template(), Point::new(300.0, 250.0));
    graph
        .add_connection(&start, 0, &http, 0)
        .expect("start -> http must connect");
    graph.set_job_name("Ping API");
    (graph, start, http)
}

/// Virtual position of a port, using the default layout.
#[allow(dead_code)]
pub fn port_anchor(graph: &Graph, id: &NodeId, kind: PortKind, index: u32) -> Point {
    let layout = PortLayout::from_settings(&EditorSettings::default());
    let node = graph.node(id).expect("node must exist");
    layout
        .anchor(node, kind, index)
        .expect("port index must be in range")
}

/// A point inside the node body, clear of every port.
#[allow(dead_code)]
pub fn body_point(graph: &Graph, id: &NodeId) -> Point {
    let node = graph.node(id).expect("node must exist");
    node.bounds().center()
}

#[allow(dead_code)]
pub fn pointer_move(position: Point) -> InputEvent {
    InputEvent::PointerMove { position }
}

#[allow(dead_code)]
pub fn ctrl_down(position: Point) -> InputEvent {
    InputEvent::primary_down_with(position, Modifiers::CTRL)
}

#[allow(dead_code)]
pub fn key_with(key: Key, modifiers: Modifiers) -> InputEvent {
    InputEvent::KeyDown {
        key,
        modifiers,
        in_text_input: false,
    }
}

/// Collects every confirmation request and answers with `answer`.
#[allow(dead_code)]
pub struct RecordingConfirm {
    pub answer: bool,
    pub requests: Vec<DeleteRequest>,
}

#[allow(dead_code)]
impl RecordingConfirm {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            requests: Vec::new(),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            requests: Vec::new(),
        }
    }
}

impl Confirm for RecordingConfirm {
    fn confirm(&mut self, request: &DeleteRequest) -> bool {
        self.requests.push(request.clone());
        self.answer
    }
}
