pub mod describe;
pub mod graph;
pub mod node;
pub mod resolve;
pub mod view;

pub use describe::SchemaDescription;
pub use graph::SchemaGraph;
pub use node::{EdgeKind, NodeId, NodeKind, OnDeleteAction, SchemaNode, INDEX_DATA_TABLE_PREFIX};
pub use view::{ColumnRef, IndexRef, KeyColumnRef, TableRef};

use crate::dialect::Dialect;

/// Immutable, versioned catalog snapshot.
///
/// A snapshot is never modified once built. Applying a statement produces a
/// new `Schema` whose graph shares every untouched node with this one, so
/// holders of an older snapshot keep a frozen view.
#[derive(Debug, Clone)]
pub struct Schema {
    graph: SchemaGraph,
    dialect: Dialect,
    version: u64,
}

impl Schema {
    /// Empty catalog at version 0.
    pub fn empty(dialect: Dialect) -> Self {
        Self {
            graph: SchemaGraph::new(),
            dialect,
            version: 0,
        }
    }

    pub(crate) fn from_parts(graph: SchemaGraph, dialect: Dialect, version: u64) -> Self {
        Self {
            graph,
            dialect,
            version,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Number of committed statements that changed the catalog.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.len()
    }

    /// User tables in creation order. Index data tables are not listed.
    pub fn tables(&self) -> Vec<TableRef<'_>> {
        self.graph
            .nodes()
            .filter_map(|node| match node {
                SchemaNode::Table(t) => Some(TableRef::new(self, t)),
                _ => None,
            })
            .collect()
    }

    /// Indexes in creation order.
    pub fn indexes(&self) -> Vec<IndexRef<'_>> {
        self.graph
            .nodes()
            .filter_map(|node| node.as_index().map(|i| IndexRef::new(self, i)))
            .collect()
    }

    pub(crate) fn table_by_id(&self, id: NodeId) -> Option<TableRef<'_>> {
        self.graph
            .get(id)
            .and_then(|node| node.as_table())
            .map(|t| TableRef::new(self, t))
    }

    pub(crate) fn column_by_id(&self, id: NodeId) -> Option<ColumnRef<'_>> {
        self.graph
            .get(id)
            .and_then(|node| node.as_column())
            .map(|c| ColumnRef::new(self, c))
    }

    pub(crate) fn key_column_by_id(&self, id: NodeId) -> Option<KeyColumnRef<'_>> {
        self.graph
            .get(id)
            .and_then(|node| node.as_key_column())
            .map(|k| KeyColumnRef::new(self, k))
    }

    pub(crate) fn index_by_id(&self, id: NodeId) -> Option<IndexRef<'_>> {
        self.graph
            .get(id)
            .and_then(|node| node.as_index())
            .map(|i| IndexRef::new(self, i))
    }
}
