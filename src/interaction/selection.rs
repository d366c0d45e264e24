use crate::graph::{Graph, NodeId};
use ahash::AHashSet;

/// Transient set of selected nodes with an optional primary node.
///
/// The primary node, when present, is always a member of the set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    ids: AHashSet<NodeId>,
    primary: Option<NodeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn primary(&self) -> Option<&NodeId> {
        self.primary.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.ids.iter()
    }

    /// Selected ids in a stable order.
    pub fn sorted_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn select_only(&mut self, id: NodeId) {
        self.ids.clear();
        self.ids.insert(id.clone());
        self.primary = Some(id);
    }

    /// Adds or removes `id`. A newly added node becomes primary.
    pub fn toggle(&mut self, id: NodeId) {
        if self.ids.remove(&id) {
            if self.primary.as_ref() == Some(&id) {
                self.primary = None;
            }
        } else {
            self.ids.insert(id.clone());
            self.primary = Some(id);
        }
    }

    pub fn extend<I: IntoIterator<Item = NodeId>>(&mut self, ids: I) {
        self.ids.extend(ids);
    }

    /// Replaces the set. The primary survives only if it is still selected.
    pub fn replace<I: IntoIterator<Item = NodeId>>(&mut self, ids: I) {
        self.ids = ids.into_iter().collect();
        if let Some(p) = &self.primary {
            if !self.ids.contains(p) {
                self.primary = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.primary = None;
    }

    /// Drops ids that no longer exist in `graph`.
    pub fn retain_existing(&mut self, graph: &Graph) {
        self.ids.retain(|id| graph.contains_node(id));
        if let Some(p) = &self.primary {
            if !graph.contains_node(p) {
                self.primary = None;
            }
        }
    }
}
