//! Port placement and hit testing in virtual coordinates.
//!
//! Inputs sit on the left edge of a node and outputs on the right edge, spread
//! vertically around the node's middle. Both the interaction controller and
//! the render layer use these anchors, so what is drawn is what is hit.

use crate::config::EditorSettings;
use crate::geometry::{Point, Rect};
use crate::graph::{FlowNode, Graph, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    Input,
    Output,
}

/// Addresses one port on one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortRef {
    pub node_id: NodeId,
    pub kind: PortKind,
    pub index: u32,
}

/// What lies under a virtual-space point.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    Port(PortRef),
    Node(NodeId),
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortLayout {
    pub spacing: f64,
    pub hit_radius: f64,
}

impl PortLayout {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            spacing: settings.port_spacing,
            hit_radius: settings.port_hit_radius,
        }
    }

    /// Virtual position of a port's center. `None` if the index is out of range.
    pub fn anchor(&self, node: &FlowNode, kind: PortKind, index: u32) -> Option<Point> {
        let count = match kind {
            PortKind::Input => node.input_port_count,
            PortKind::Output => node.output_port_count,
        };
        if index >= count {
            return None;
        }
        let bounds = node.bounds();
        let x = match kind {
            PortKind::Input => bounds.min.x,
            PortKind::Output => bounds.max.x,
        };
        let offset = (index as f64 - (count as f64 - 1.0) / 2.0) * self.spacing;
        Some(Point::new(x, bounds.center().y + offset))
    }

    /// Every port of `node` with its anchor, inputs first.
    pub fn ports<'a>(
        &'a self,
        node: &'a FlowNode,
    ) -> impl Iterator<Item = (PortRef, Point)> + 'a {
        let inputs = (0..node.input_port_count).map(|i| (PortKind::Input, i));
        let outputs = (0..node.output_port_count).map(|i| (PortKind::Output, i));
        inputs.chain(outputs).filter_map(move |(kind, index)| {
            self.anchor(node, kind, index).map(|p| {
                (
                    PortRef {
                        node_id: node.id.clone(),
                        kind,
                        index,
                    },
                    p,
                )
            })
        })
    }

    /// Finds what is under `point`. Later nodes are on top; ports win over
    /// node bodies.
    pub fn hit_test(&self, graph: &Graph, point: Point) -> HitTarget {
        let nodes: Vec<&FlowNode> = graph.nodes().collect();
        for node in nodes.iter().rev() {
            let nearest = self
                .ports(node)
                .map(|(port, anchor)| (port, anchor.distance_to(point)))
                .filter(|(_, d)| *d <= self.hit_radius)
                .min_by(|a, b| a.1.total_cmp(&b.1));
            if let Some((port, _)) = nearest {
                return HitTarget::Port(port);
            }
            if node.bounds().contains(point) {
                return HitTarget::Node(node.id.clone());
            }
        }
        HitTarget::Canvas
    }
}

/// Ids of every node whose bounds intersect `rect`, in insertion order.
pub fn nodes_intersecting(graph: &Graph, rect: &Rect) -> Vec<NodeId> {
    graph
        .nodes()
        .filter(|n| n.bounds().intersects(rect))
        .map(|n| n.id.clone())
        .collect()
}
