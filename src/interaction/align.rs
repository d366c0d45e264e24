use crate::geometry::Point;
use crate::graph::{FlowNode, Graph, NodeId};
use itertools::Itertools;
use tracing::debug;

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    /// Shared horizontal center.
    Center,
    Right,
    Top,
    /// Shared vertical middle.
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Alignment {
    fn axis(self) -> Axis {
        match self {
            Alignment::Left | Alignment::Center | Alignment::Right => Axis::X,
            Alignment::Top | Alignment::Middle | Alignment::Bottom => Axis::Y,
        }
    }

    /// The coordinate every node will share.
    fn target(self, nodes: &[&FlowNode]) -> f64 {
        let count = nodes.len() as f64;
        match self {
            Alignment::Left => nodes
                .iter()
                .map(|n| n.position.x)
                .fold(f64::INFINITY, f64::min),
            Alignment::Top => nodes
                .iter()
                .map(|n| n.position.y)
                .fold(f64::INFINITY, f64::min),
            Alignment::Right => nodes
                .iter()
                .map(|n| n.bounds().max.x)
                .fold(f64::NEG_INFINITY, f64::max),
            Alignment::Bottom => nodes
                .iter()
                .map(|n| n.bounds().max.y)
                .fold(f64::NEG_INFINITY, f64::max),
            // Shifted so the widest (tallest) node still lands at a non-negative origin.
            Alignment::Center => {
                let mean = nodes.iter().map(|n| n.bounds().center().x).sum::<f64>() / count;
                nodes
                    .iter()
                    .map(|n| n.size.width / 2.0)
                    .fold(mean, f64::max)
            }
            Alignment::Middle => {
                let mean = nodes.iter().map(|n| n.bounds().center().y).sum::<f64>() / count;
                nodes
                    .iter()
                    .map(|n| n.size.height / 2.0)
                    .fold(mean, f64::max)
            }
        }
    }

    /// Where `node`'s relevant edge/center currently is.
    fn current(self, node: &FlowNode) -> f64 {
        let b = node.bounds();
        match self {
            Alignment::Left => b.min.x,
            Alignment::Top => b.min.y,
            Alignment::Right => b.max.x,
            Alignment::Bottom => b.max.y,
            Alignment::Center => b.center().x,
            Alignment::Middle => b.center().y,
        }
    }

    /// New top-left so that `node` lines up with `target`.
    fn aligned_position(self, node: &FlowNode, target: f64) -> Point {
        let Point { x, y } = node.position;
        let (w, h) = (node.size.width, node.size.height);
        let edge = match self {
            Alignment::Left | Alignment::Top => target,
            Alignment::Right => target - w,
            Alignment::Bottom => target - h,
            Alignment::Center => target - w / 2.0,
            Alignment::Middle => target - h / 2.0,
        };
        match self.axis() {
            Axis::X => Point::new(edge, y),
            Axis::Y => Point::new(x, edge),
        }
    }
}

/// Lines up the nodes in `ids` on one axis, leaving the other axis alone.
///
/// Needs at least two existing nodes; returns false and changes nothing
/// otherwise, or when the nodes are already aligned.
pub fn align_nodes<'a, I>(graph: &mut Graph, ids: I, alignment: Alignment) -> bool
where
    I: IntoIterator<Item = &'a NodeId>,
{
    let nodes: Vec<&FlowNode> = ids
        .into_iter()
        .unique()
        .filter_map(|id| graph.node(id))
        .collect();
    if nodes.len() < 2 {
        return false;
    }

    let target = alignment.target(&nodes);
    if nodes
        .iter()
        .all(|n| (alignment.current(n) - target).abs() <= EPSILON)
    {
        return false;
    }

    let moves: Vec<(NodeId, Point)> = nodes
        .iter()
        .map(|n| (n.id.clone(), alignment.aligned_position(n, target)))
        .collect();
    for (id, position) in &moves {
        graph.move_node(id, *position);
    }
    debug!(?alignment, count = moves.len(), target, "Aligned nodes");
    true
}
