use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dialect::KeyOrdering;
use crate::types::DataType;

/// Name prefix of the hidden table backing an index.
pub const INDEX_DATA_TABLE_PREFIX: &str = "_index_data_table_";

/// Stable identity of a catalog node. Unmodified nodes keep their id (and
/// their allocation) across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDeleteAction {
    Cascade,
    NoAction,
}

impl fmt::Display for OnDeleteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnDeleteAction::Cascade => f.write_str("CASCADE"),
            OnDeleteAction::NoAction => f.write_str("NO ACTION"),
        }
    }
}

/// Physical placement of a table's rows under a parent table's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interleave {
    pub parent: NodeId,
    pub on_delete: OnDeleteAction,
}

/// A user table or an index data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) columns: Vec<NodeId>,
    pub(crate) primary_key: Vec<NodeId>,
    pub(crate) interleave: Option<Interleave>,
    /// Set only for index data tables.
    pub(crate) owner_index: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) table: NodeId,
    pub(crate) data_type: DataType,
    pub(crate) is_nullable: bool,
    /// Lookup key of the column this one projects (index data tables only).
    /// Never an edge: it must not keep the source alive.
    pub(crate) source_column: Option<NodeId>,
}

/// One part of a primary key: a column plus its ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumn {
    pub(crate) id: NodeId,
    pub(crate) column: NodeId,
    pub(crate) column_name: String,
    pub(crate) ordering: KeyOrdering,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) indexed_table: NodeId,
    /// Leading key columns of the data table's primary key.
    pub(crate) key_columns: Vec<NodeId>,
    /// Data-table columns copied from the indexed table.
    pub(crate) stored_columns: Vec<NodeId>,
    pub(crate) is_unique: bool,
    pub(crate) is_null_filtered: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) data_table: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Table,
    IndexDataTable,
    Column,
    KeyColumn,
    Index,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Table => "Table",
            NodeKind::IndexDataTable => "IndexDataTable",
            NodeKind::Column => "Column",
            NodeKind::KeyColumn => "KeyColumn",
            NodeKind::Index => "Index",
        }
    }

    /// Kinds registered in the schema-wide name index. Tables and indexes
    /// share one namespace.
    pub(crate) fn is_schema_object(self) -> bool {
        matches!(self, NodeKind::Table | NodeKind::Index)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    /// The target's lifetime is bound to the source.
    Owns,
    /// The source requires the target to exist.
    References,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    Table(Table),
    IndexDataTable(Table),
    Column(Column),
    KeyColumn(KeyColumn),
    Index(Index),
}

impl SchemaNode {
    pub fn id(&self) -> NodeId {
        match self {
            SchemaNode::Table(t) | SchemaNode::IndexDataTable(t) => t.id,
            SchemaNode::Column(c) => c.id,
            SchemaNode::KeyColumn(k) => k.id,
            SchemaNode::Index(i) => i.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            SchemaNode::Table(_) => NodeKind::Table,
            SchemaNode::IndexDataTable(_) => NodeKind::IndexDataTable,
            SchemaNode::Column(_) => NodeKind::Column,
            SchemaNode::KeyColumn(_) => NodeKind::KeyColumn,
            SchemaNode::Index(_) => NodeKind::Index,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SchemaNode::Table(t) | SchemaNode::IndexDataTable(t) => &t.name,
            SchemaNode::Column(c) => &c.name,
            SchemaNode::KeyColumn(k) => &k.column_name,
            SchemaNode::Index(i) => &i.name,
        }
    }

    /// Outgoing edges implied by the node's own fields.
    pub fn edges(&self) -> Vec<(NodeId, EdgeKind)> {
        match self {
            SchemaNode::Table(t) | SchemaNode::IndexDataTable(t) => {
                let mut edges: Vec<(NodeId, EdgeKind)> = t
                    .columns
                    .iter()
                    .chain(t.primary_key.iter())
                    .map(|id| (*id, EdgeKind::Owns))
                    .collect();
                if let Some(interleave) = &t.interleave {
                    edges.push((interleave.parent, EdgeKind::References));
                }
                edges
            }
            SchemaNode::Column(_) => Vec::new(),
            SchemaNode::KeyColumn(k) => vec![(k.column, EdgeKind::References)],
            SchemaNode::Index(i) => {
                let mut edges = vec![
                    (i.indexed_table, EdgeKind::References),
                    (i.data_table, EdgeKind::Owns),
                ];
                if let Some(parent) = i.parent {
                    edges.push((parent, EdgeKind::References));
                }
                edges
            }
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            SchemaNode::Table(t) | SchemaNode::IndexDataTable(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&Column> {
        match self {
            SchemaNode::Column(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_key_column(&self) -> Option<&KeyColumn> {
        match self {
            SchemaNode::KeyColumn(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<&Index> {
        match self {
            SchemaNode::Index(i) => Some(i),
            _ => None,
        }
    }
}
