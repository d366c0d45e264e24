//! The graph model: nodes, connections and the job name.
//!
//! Every mutation here is synchronous and total. Invalid requests (unknown
//! ids, self-loops, out-of-range ports) are rejected as no-ops so the model
//! can never end up violating its own invariants, whatever the caller sends.

use crate::catalog::NodeTemplate;
use crate::config::StepConfig;
use crate::geometry::{Point, Rect, Size};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

mod connection;
mod node;

pub use connection::{Connection, ConnectionId};
pub use node::{FlowNode, NodeId};

/// Deep copy of the graph contents, in insertion order.
///
/// This is also the serialized `flow` section of a compiled job, so it can
/// be fed back into [`Graph::from_snapshot`] to reopen a saved job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<FlowNode>,
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone)]
pub struct Graph {
    nodes: IndexMap<NodeId, FlowNode>,
    connections: IndexMap<ConnectionId, Connection>,
    job_name: String,
    node_size: Size,
    next_node_seq: u64,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::with_node_size(Size::new(180.0, 72.0))
    }

    /// Creates an empty graph whose new nodes get `node_size`.
    pub fn with_node_size(node_size: Size) -> Self {
        Self {
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
            job_name: String::new(),
            node_size,
            next_node_seq: 1,
        }
    }

    /// Rebuilds a graph from a snapshot, keeping node ids.
    ///
    /// Connections that would violate an invariant against the restored nodes
    /// are dropped. Fresh ids continue after the highest restored one.
    pub fn from_snapshot(snapshot: GraphSnapshot, job_name: impl Into<String>) -> Self {
        let mut graph = Self::new();
        graph.job_name = job_name.into();
        for node in snapshot.nodes {
            if let Some(seq) = node.id.sequence() {
                graph.next_node_seq = graph.next_node_seq.max(seq + 1);
            }
            graph.nodes.insert(node.id.clone(), node);
        }
        for conn in snapshot.connections {
            if graph
                .add_connection(
                    &conn.source_node_id,
                    conn.source_port,
                    &conn.target_node_id,
                    conn.target_port,
                )
                .is_none()
            {
                warn!(connection = %conn.id, "Dropping invalid connection from snapshot");
            }
        }
        graph
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn set_job_name(&mut self, name: impl Into<String>) {
        self.job_name = name.into();
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Size given to nodes added from now on. Existing nodes keep theirs.
    pub fn set_node_size(&mut self, size: Size) {
        self.node_size = size;
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn node(&self, id: &NodeId) -> Option<&FlowNode> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.nodes.values()
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// Connections in insertion order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Connections that have `node_id` as source or target.
    pub fn connections_of<'a>(
        &'a self,
        node_id: &'a NodeId,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.values().filter(move |c| c.touches(node_id))
    }

    /// Bounding box of every node, or `None` for an empty graph.
    pub fn bounding_box(&self) -> Option<Rect> {
        Rect::bounding(self.nodes.values().map(FlowNode::bounds))
    }

    fn fresh_node_id(&mut self) -> NodeId {
        loop {
            let id = NodeId::new(format!("node-{}", self.next_node_seq));
            self.next_node_seq += 1;
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Places a new node built from `template`. Negative coordinates are clamped to zero.
    pub fn add_node(&mut self, template: &NodeTemplate, position: Point) -> NodeId {
        let id = self.fresh_node_id();
        let node = FlowNode::from_template(id.clone(), template, position, self.node_size);
        debug!(node = %id, step_type = %node.step_type, "Node added");
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Moves a node, clamping to non-negative coordinates. Returns false for unknown ids.
    pub fn move_node(&mut self, id: &NodeId, position: Point) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = position.clamp_non_negative();
                true
            }
            None => false,
        }
    }

    /// Removes a node together with every connection touching it.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<FlowNode> {
        let node = self.nodes.shift_remove(id)?;
        let before = self.connections.len();
        self.connections.retain(|_, c| !c.touches(id));
        debug!(
            node = %id,
            cascaded = before - self.connections.len(),
            "Node removed"
        );
        Some(node)
    }

    /// Replaces a node's configuration wholesale. Returns false for unknown ids.
    pub fn set_node_config(&mut self, id: &NodeId, config: StepConfig) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.config = config;
                true
            }
            None => false,
        }
    }

    pub fn set_display_name(&mut self, id: &NodeId, name: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.display_name = name.into();
                true
            }
            None => false,
        }
    }

    /// Connects an output port to an input port.
    ///
    /// Returns the id of the connection, which is the existing one when the
    /// same endpoints are already connected. Returns `None`, leaving the graph
    /// unchanged, for self-loops, unknown nodes and out-of-range ports.
    pub fn add_connection(
        &mut self,
        source: &NodeId,
        source_port: u32,
        target: &NodeId,
        target_port: u32,
    ) -> Option<ConnectionId> {
        if source == target {
            debug!(node = %source, "Rejected self-loop connection");
            return None;
        }
        let (Some(src), Some(tgt)) = (self.nodes.get(source), self.nodes.get(target)) else {
            warn!(source = %source, target = %target, "Rejected connection to unknown node");
            return None;
        };
        if source_port >= src.output_port_count || target_port >= tgt.input_port_count {
            warn!(
                source = %source,
                source_port,
                target = %target,
                target_port,
                "Rejected connection with out-of-range port"
            );
            return None;
        }

        let conn = Connection::new(source.clone(), source_port, target.clone(), target_port);
        let id = conn.id.clone();
        if !self.connections.contains_key(&id) {
            debug!(connection = %id, "Connection added");
            self.connections.insert(id.clone(), conn);
        }
        Some(id)
    }

    pub fn remove_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        let removed = self.connections.shift_remove(id);
        if removed.is_some() {
            debug!(connection = %id, "Connection removed");
        }
        removed
    }

    /// Deep, owned copy of the current contents for the compiler.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.values().cloned().collect(),
            connections: self.connections.values().cloned().collect(),
        }
    }

    /// Drops every node and connection. Node ids are still never reused.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }
}
