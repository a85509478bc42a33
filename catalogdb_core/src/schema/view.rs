use std::fmt;

use crate::dialect::{KeyOrdering, NullOrdering, SortDirection};
use crate::types::DataType;

use super::node::{Column, Index, KeyColumn, NodeId, OnDeleteAction, SchemaNode, Table};
use super::Schema;

/// Read-only handle on a table (or index data table) within one snapshot.
#[derive(Clone, Copy)]
pub struct TableRef<'a> {
    schema: &'a Schema,
    table: &'a Table,
}

#[derive(Clone, Copy)]
pub struct ColumnRef<'a> {
    schema: &'a Schema,
    column: &'a Column,
}

#[derive(Clone, Copy)]
pub struct KeyColumnRef<'a> {
    schema: &'a Schema,
    key: &'a KeyColumn,
}

#[derive(Clone, Copy)]
pub struct IndexRef<'a> {
    schema: &'a Schema,
    index: &'a Index,
}

impl<'a> TableRef<'a> {
    pub(crate) fn new(schema: &'a Schema, table: &'a Table) -> Self {
        Self { schema, table }
    }

    pub fn id(&self) -> NodeId {
        self.table.id
    }

    pub fn name(&self) -> &'a str {
        &self.table.name
    }

    pub fn is_index_data_table(&self) -> bool {
        self.table.owner_index.is_some()
    }

    /// The index owning this table, for index data tables.
    pub fn owner_index(&self) -> Option<IndexRef<'a>> {
        self.table.owner_index.and_then(|id| self.schema.index_by_id(id))
    }

    pub fn columns(&self) -> Vec<ColumnRef<'a>> {
        self.table
            .columns
            .iter()
            .filter_map(|id| self.schema.column_by_id(*id))
            .collect()
    }

    pub fn primary_key(&self) -> Vec<KeyColumnRef<'a>> {
        self.table
            .primary_key
            .iter()
            .filter_map(|id| self.schema.key_column_by_id(*id))
            .collect()
    }

    /// Case-sensitive column lookup.
    pub fn find_column(&self, name: &str) -> Option<ColumnRef<'a>> {
        self.columns().into_iter().find(|c| c.name() == name)
    }

    /// Interleave parent, if any.
    pub fn parent(&self) -> Option<TableRef<'a>> {
        self.table
            .interleave
            .and_then(|i| self.schema.table_by_id(i.parent))
    }

    pub fn on_delete(&self) -> Option<OnDeleteAction> {
        self.table.interleave.map(|i| i.on_delete)
    }

    /// Indexes whose indexed table is this table, oldest first.
    pub fn indexes(&self) -> Vec<IndexRef<'a>> {
        self.schema
            .graph()
            .dependents(self.id())
            .into_iter()
            .filter_map(|id| self.schema.index_by_id(id))
            .filter(|index| index.index.indexed_table == self.id())
            .collect()
    }

    /// User tables interleaved directly in this table, oldest first.
    pub fn children(&self) -> Vec<TableRef<'a>> {
        self.schema
            .graph()
            .dependents(self.id())
            .into_iter()
            .filter_map(|id| match self.schema.graph().get(id) {
                Some(SchemaNode::Table(t)) => Some(TableRef::new(self.schema, t)),
                _ => None,
            })
            .collect()
    }
}

impl<'a> ColumnRef<'a> {
    pub(crate) fn new(schema: &'a Schema, column: &'a Column) -> Self {
        Self { schema, column }
    }

    pub fn id(&self) -> NodeId {
        self.column.id
    }

    pub fn name(&self) -> &'a str {
        &self.column.name
    }

    pub fn data_type(&self) -> DataType {
        self.column.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.column.is_nullable
    }

    pub fn table(&self) -> Option<TableRef<'a>> {
        self.schema.table_by_id(self.column.table)
    }

    /// Column this one was projected from, resolved against the same
    /// snapshot.
    pub fn source_column(&self) -> Option<ColumnRef<'a>> {
        self.column
            .source_column
            .and_then(|id| self.schema.column_by_id(id))
    }
}

impl<'a> KeyColumnRef<'a> {
    pub(crate) fn new(schema: &'a Schema, key: &'a KeyColumn) -> Self {
        Self { schema, key }
    }

    pub fn id(&self) -> NodeId {
        self.key.id
    }

    pub fn column(&self) -> Option<ColumnRef<'a>> {
        self.schema.column_by_id(self.key.column)
    }

    pub fn column_name(&self) -> &'a str {
        &self.key.column_name
    }

    pub fn ordering(&self) -> KeyOrdering {
        self.key.ordering
    }

    pub fn is_descending(&self) -> bool {
        self.key.ordering.direction == SortDirection::Desc
    }

    pub fn is_nulls_last(&self) -> bool {
        self.key.ordering.nulls == NullOrdering::NullsLast
    }
}

impl<'a> IndexRef<'a> {
    pub(crate) fn new(schema: &'a Schema, index: &'a Index) -> Self {
        Self { schema, index }
    }

    pub fn id(&self) -> NodeId {
        self.index.id
    }

    pub fn name(&self) -> &'a str {
        &self.index.name
    }

    pub fn indexed_table(&self) -> Option<TableRef<'a>> {
        self.schema.table_by_id(self.index.indexed_table)
    }

    pub fn key_columns(&self) -> Vec<KeyColumnRef<'a>> {
        self.index
            .key_columns
            .iter()
            .filter_map(|id| self.schema.key_column_by_id(*id))
            .collect()
    }

    pub fn stored_columns(&self) -> Vec<ColumnRef<'a>> {
        self.index
            .stored_columns
            .iter()
            .filter_map(|id| self.schema.column_by_id(*id))
            .collect()
    }

    pub fn index_data_table(&self) -> Option<TableRef<'a>> {
        self.schema.table_by_id(self.index.data_table)
    }

    pub fn parent(&self) -> Option<TableRef<'a>> {
        self.index.parent.and_then(|id| self.schema.table_by_id(id))
    }

    pub fn is_unique(&self) -> bool {
        self.index.is_unique
    }

    pub fn is_null_filtered(&self) -> bool {
        self.index.is_null_filtered
    }
}

macro_rules! identity_eq {
    ($($ty:ident),*) => {
        $(
            impl PartialEq for $ty<'_> {
                fn eq(&self, other: &Self) -> bool {
                    self.id() == other.id()
                }
            }

            impl Eq for $ty<'_> {}
        )*
    };
}

identity_eq!(TableRef, ColumnRef, KeyColumnRef, IndexRef);

impl fmt::Debug for TableRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}

impl fmt::Debug for ColumnRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("type", &self.data_type())
            .field("nullable", &self.is_nullable())
            .finish()
    }
}

impl fmt::Debug for KeyColumnRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyColumnRef")
            .field("id", &self.id())
            .field("column", &self.column_name())
            .field("ordering", &self.ordering())
            .finish()
    }
}

impl fmt::Debug for IndexRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}
