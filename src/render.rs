//! Immediate-mode draw list for a host renderer.
//!
//! [`build_frame`] reads the graph, the viewport and the interaction state and
//! returns everything a renderer needs in screen coordinates. It never mutates
//! any of its inputs; pointer and keyboard input go back through
//! [`InteractionController::handle`](crate::interaction::InteractionController::handle).
//! Styling (colors, fonts) is left to the host.

use crate::config::EditorSettings;
use crate::geometry::{Point, Rect};
use crate::graph::{ConnectionId, Graph, NodeId};
use crate::interaction::{InteractionController, InteractionState};
use crate::layout::{PortKind, PortRef};
use crate::viewport::Viewport;

/// How a node should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    /// The only selected node.
    Single,
    /// One of several selected nodes.
    Multi,
}

/// Cubic Bézier in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl Curve {
    /// Horizontal-tangent curve from an output anchor to an input anchor.
    pub fn between(from: Point, to: Point, tension: f64, min_handle: f64) -> Self {
        let handle = ((to.x - from.x).abs() * tension).max(min_handle);
        Self {
            from,
            ctrl1: Point::new(from.x + handle, from.y),
            ctrl2: Point::new(to.x - handle, to.y),
            to,
        }
    }

    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * self.from.x + b * self.ctrl1.x + c * self.ctrl2.x + d * self.to.x,
            a * self.from.y + b * self.ctrl1.y + c * self.ctrl2.y + d * self.to.y,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortShape {
    pub port: PortRef,
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeShape {
    pub id: NodeId,
    pub title: String,
    pub step_type: String,
    pub category: String,
    pub rect: Rect,
    pub highlight: Highlight,
    pub primary: bool,
    pub ports: Vec<PortShape>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionShape {
    pub id: ConnectionId,
    pub curve: Curve,
}

/// Everything to draw for one frame, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub scale: f64,
    pub nodes: Vec<NodeShape>,
    pub connections: Vec<ConnectionShape>,
    /// Live curve while a connection is being drawn.
    pub preview: Option<Curve>,
    pub rubber_band: Option<Rect>,
}

const MIN_HANDLE: f64 = 40.0;

pub fn build_frame(
    graph: &Graph,
    viewport: &Viewport,
    controller: &InteractionController,
    settings: &EditorSettings,
) -> Frame {
    let scale = viewport.scale();
    let layout = controller.port_layout();
    let selection = controller.selection();
    let anchor_on_screen = |port: &PortRef| {
        graph
            .node(&port.node_id)
            .and_then(|n| layout.anchor(n, port.kind, port.index))
            .map(|p| viewport.to_screen(p))
    };

    let nodes = graph
        .nodes()
        .map(|node| {
            let highlight = match (selection.contains(&node.id), selection.len()) {
                (false, _) => Highlight::None,
                (true, 1) => Highlight::Single,
                (true, _) => Highlight::Multi,
            };
            NodeShape {
                id: node.id.clone(),
                title: node.display_name.clone(),
                step_type: node.step_type.clone(),
                category: node.category.clone(),
                rect: viewport.rect_to_screen(&node.bounds()),
                highlight,
                primary: selection.primary() == Some(&node.id),
                ports: layout
                    .ports(node)
                    .map(|(port, anchor)| PortShape {
                        port,
                        center: viewport.to_screen(anchor),
                        radius: settings.port_radius * scale,
                    })
                    .collect(),
            }
        })
        .collect();

    let connections = graph
        .connections()
        .filter_map(|conn| {
            let from = anchor_on_screen(&PortRef {
                node_id: conn.source_node_id.clone(),
                kind: PortKind::Output,
                index: conn.source_port,
            })?;
            let to = anchor_on_screen(&PortRef {
                node_id: conn.target_node_id.clone(),
                kind: PortKind::Input,
                index: conn.target_port,
            })?;
            Some(ConnectionShape {
                id: conn.id.clone(),
                curve: Curve::between(from, to, settings.curve_tension, MIN_HANDLE * scale),
            })
        })
        .collect();

    let preview = match controller.state() {
        InteractionState::DrawingConnection { from, pointer } => anchor_on_screen(from).map(|a| {
            Curve::between(
                a,
                viewport.to_screen(*pointer),
                settings.curve_tension,
                MIN_HANDLE * scale,
            )
        }),
        _ => None,
    };

    Frame {
        scale,
        nodes,
        connections,
        preview,
        rubber_band: controller
            .rubber_band()
            .map(|r| viewport.rect_to_screen(&r)),
    }
}
