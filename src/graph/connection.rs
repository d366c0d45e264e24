use super::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a connection, derived from its endpoints.
///
/// Two connections between the same pair of ports always get the same id,
/// so re-adding a removed connection restores the identical map entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn derive(
        source_node: &NodeId,
        source_port: u32,
        target_node: &NodeId,
        target_port: u32,
    ) -> Self {
        Self(format!(
            "{}:{}->{}:{}",
            source_node, source_port, target_node, target_port
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directed edge from an output port to an input port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub source_node_id: NodeId,
    /// Zero-based output port index on the source node.
    pub source_port: u32,
    pub target_node_id: NodeId,
    /// Zero-based input port index on the target node.
    pub target_port: u32,
}

impl Connection {
    pub fn new(
        source_node_id: NodeId,
        source_port: u32,
        target_node_id: NodeId,
        target_port: u32,
    ) -> Self {
        Self {
            id: ConnectionId::derive(&source_node_id, source_port, &target_node_id, target_port),
            source_node_id,
            source_port,
            target_node_id,
            target_port,
        }
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source_node_id == node_id || &self.target_node_id == node_id
    }
}
