use std::collections::BTreeSet;
use std::sync::Arc;

use im::{OrdMap, OrdSet};
use tracing::trace;

use crate::error::{Result, SchemaError};

use super::node::{EdgeKind, NodeId, NodeKind, SchemaNode};

/// Persistent arena of catalog nodes plus their dependency edges.
///
/// Every map is an `im` persistent map, so cloning a graph is O(1) and a
/// modified clone shares all untouched nodes with its origin. Forward edges,
/// the reverse adjacency index and the name index are always updated
/// together.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    nodes: OrdMap<NodeId, Arc<SchemaNode>>,
    edges: OrdMap<NodeId, OrdMap<NodeId, EdgeKind>>,
    dependents: OrdMap<NodeId, OrdSet<NodeId>>,
    names: OrdMap<String, NodeId>,
    next_id: u64,
    /// Ids inserted or removed since the graph was last sealed.
    touched: OrdSet<NodeId>,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&SchemaNode> {
        self.nodes.get(&id).map(|node| node.as_ref())
    }

    /// Shared handle of a node; two snapshots that both contain an untouched
    /// node return the same allocation.
    pub fn get_shared(&self, id: NodeId) -> Option<&Arc<SchemaNode>> {
        self.nodes.get(&id)
    }

    /// All nodes in id (creation) order.
    pub fn nodes(&self) -> impl Iterator<Item = &SchemaNode> + '_ {
        self.nodes.values().map(|node| node.as_ref())
    }

    /// Returns a new graph containing `node`. The receiver is unchanged.
    pub fn add_node(&self, node: SchemaNode) -> Result<Self> {
        let mut next = self.clone();
        next.insert(node)?;
        Ok(next)
    }

    /// Returns a new graph without `id` and every node it owns, directly or
    /// transitively. The receiver is unchanged.
    pub fn remove_node(&self, id: NodeId) -> Self {
        let mut next = self.clone();
        next.remove(id);
        next
    }

    /// Looks a node up by kind and name. Tables and indexes go through the
    /// name index; other kinds are scanned.
    pub fn find(&self, kind: NodeKind, name: &str, case_sensitive: bool) -> Option<&SchemaNode> {
        if kind.is_schema_object() {
            if case_sensitive {
                return self
                    .names
                    .get(name)
                    .and_then(|id| self.get(*id))
                    .filter(|node| node.kind() == kind);
            }
            return self
                .names
                .iter()
                .filter(|(n, _)| n.eq_ignore_ascii_case(name))
                .filter_map(|(_, id)| self.get(*id))
                .find(|node| node.kind() == kind);
        }
        self.nodes().find(|node| {
            node.kind() == kind
                && if case_sensitive {
                    node.name() == name
                } else {
                    node.name().eq_ignore_ascii_case(name)
                }
        })
    }

    /// Nodes holding an edge to `id`, in id order.
    pub fn dependents(&self, id: NodeId) -> Vec<NodeId> {
        self.dependents
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn edges_from(&self, id: NodeId) -> Vec<(NodeId, EdgeKind)> {
        self.edges
            .get(&id)
            .map(|out| out.iter().map(|(target, kind)| (*target, *kind)).collect())
            .unwrap_or_default()
    }

    /// Verifies that every edge target, reverse entry and name entry
    /// resolves. Walks the whole graph.
    pub fn check_integrity(&self) -> Result<()> {
        for id in self.edges.keys() {
            self.check_edges_of(*id)?;
        }
        for (target, from) in self.dependents.iter() {
            if !self.nodes.contains_key(target) {
                return Err(self.dangling(from, *target));
            }
        }
        for (name, id) in self.names.iter() {
            if !self.nodes.contains_key(id) {
                return Err(SchemaError::DanglingReference {
                    node: name.clone(),
                    target: *id,
                });
            }
        }
        Ok(())
    }

    /// Same guarantee as [`check_integrity`](Self::check_integrity), limited
    /// to the nodes inserted or removed since the last seal. A surviving
    /// node can only dangle by pointing at one of those.
    pub fn check_touched(&self) -> Result<()> {
        for id in self.touched.iter() {
            if self.nodes.contains_key(id) {
                self.check_edges_of(*id)?;
            } else if let Some(from) = self.dependents.get(id) {
                return Err(self.dangling(from, *id));
            }
        }
        Ok(())
    }

    /// Forgets the touched set once a statement's graph has been checked.
    pub(crate) fn seal(mut self) -> Self {
        self.touched = OrdSet::new();
        self
    }

    fn check_edges_of(&self, id: NodeId) -> Result<()> {
        for (target, _) in self.edges_from(id) {
            if !self.nodes.contains_key(&target) {
                return Err(self.dangling(&OrdSet::unit(id), target));
            }
        }
        Ok(())
    }

    fn dangling(&self, sources: &OrdSet<NodeId>, target: NodeId) -> SchemaError {
        let node = sources
            .iter()
            .next()
            .map(|from| match self.get(*from) {
                Some(n) => format!("{} {}", n.kind(), n.name()),
                None => from.to_string(),
            })
            .unwrap_or_else(|| target.to_string());
        SchemaError::DanglingReference { node, target }
    }

    pub(crate) fn allocate_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// In-place insert used while a statement is being applied to a private
    /// copy. Replacing a node with the same id re-derives its edges.
    pub(crate) fn insert(&mut self, node: SchemaNode) -> Result<()> {
        let id = node.id();
        let kind = node.kind();

        if kind.is_schema_object() {
            if let Some(existing) = self.names.get(node.name()) {
                if *existing != id {
                    let existing_kind = self
                        .get(*existing)
                        .map(|n| n.kind().label())
                        .unwrap_or(kind.label());
                    return Err(SchemaError::SchemaObjectAlreadyExists {
                        kind: existing_kind.to_string(),
                        name: node.name().to_string(),
                    });
                }
            }
        }

        if self.nodes.contains_key(&id) {
            self.unlink(id);
        }

        let mut out: OrdMap<NodeId, EdgeKind> = OrdMap::new();
        for (target, edge) in node.edges() {
            let merged = match out.get(&target) {
                Some(EdgeKind::Owns) => EdgeKind::Owns,
                _ => edge,
            };
            out.insert(target, merged);
        }
        for (target, _) in out.iter() {
            let mut set = self.dependents.get(target).cloned().unwrap_or_default();
            set.insert(id);
            self.dependents.insert(*target, set);
        }
        if !out.is_empty() {
            self.edges.insert(id, out);
        }
        if kind.is_schema_object() {
            self.names.insert(node.name().to_string(), id);
        }
        if id.raw() >= self.next_id {
            self.next_id = id.raw() + 1;
        }

        trace!(node = %id, kind = %kind, name = node.name(), "insert schema node");
        self.nodes.insert(id, Arc::new(node));
        self.touched.insert(id);
        Ok(())
    }

    /// In-place removal of `id` and its ownership closure. Returns the ids
    /// that were removed. A reverse entry left behind for a removed id means
    /// a surviving node still points at it.
    pub(crate) fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        let mut stack = vec![id];
        let mut seen: BTreeSet<NodeId> = BTreeSet::new();
        let mut doomed: Vec<NodeId> = Vec::new();

        while let Some(next) = stack.pop() {
            if !seen.insert(next) || !self.nodes.contains_key(&next) {
                continue;
            }
            doomed.push(next);
            if let Some(out) = self.edges.get(&next) {
                for (target, edge) in out.iter() {
                    if *edge == EdgeKind::Owns {
                        stack.push(*target);
                    }
                }
            }
        }

        for node in &doomed {
            self.unlink(*node);
            self.nodes.remove(node);
            self.touched.insert(*node);
        }
        trace!(root = %id, removed = doomed.len(), "remove schema nodes");
        doomed
    }

    /// Drops the outgoing edges and the name entry of `id`.
    fn unlink(&mut self, id: NodeId) {
        if let Some(out) = self.edges.remove(&id) {
            for (target, _) in out.iter() {
                if let Some(set) = self.dependents.get(target) {
                    let remaining = set.without(&id);
                    if remaining.is_empty() {
                        self.dependents.remove(target);
                    } else {
                        self.dependents.insert(*target, remaining);
                    }
                }
            }
        }
        if let Some(node) = self.nodes.get(&id) {
            if node.kind().is_schema_object() && self.names.get(node.name()) == Some(&id) {
                let name = node.name().to_string();
                self.names.remove(&name);
            }
        }
    }
}
