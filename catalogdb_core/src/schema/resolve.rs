//! Name resolution against one snapshot. Every lookup is an exact,
//! case-sensitive match: `T` and `t` are different tables.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::error::{Result, SchemaError};

use super::node::{NodeKind, SchemaNode};
use super::view::{ColumnRef, IndexRef, TableRef};
use super::Schema;

impl Schema {
    /// Finds a user table. Index data tables are only reachable through
    /// their index.
    pub fn find_table(&self, name: &str) -> Option<TableRef<'_>> {
        match self.graph.find(NodeKind::Table, name, true) {
            Some(SchemaNode::Table(t)) => Some(TableRef::new(self, t)),
            _ => None,
        }
    }

    pub fn find_index(&self, name: &str) -> Option<IndexRef<'_>> {
        match self.graph.find(NodeKind::Index, name, true) {
            Some(SchemaNode::Index(i)) => Some(IndexRef::new(self, i)),
            _ => None,
        }
    }

    /// Generic lookup by kind. Case-insensitive matching is only used for
    /// diagnostics; statement validation always resolves case-sensitively.
    pub fn find(&self, kind: NodeKind, name: &str, case_sensitive: bool) -> Option<&SchemaNode> {
        self.graph.find(kind, name, case_sensitive)
    }
}

#[instrument(name = "resolve::table", level = "trace", skip(schema))]
pub fn resolve_table<'a>(schema: &'a Schema, name: &str) -> Result<TableRef<'a>> {
    schema
        .find_table(name)
        .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
}

#[instrument(name = "resolve::index", level = "trace", skip(schema))]
pub fn resolve_index<'a>(schema: &'a Schema, name: &str) -> Result<IndexRef<'a>> {
    schema
        .find_index(name)
        .ok_or_else(|| SchemaError::IndexNotFound(name.to_string()))
}

/// Resolves an ordered list of column names against `table`.
///
/// The first name that does not exist is reported through `missing`, the
/// first name that repeats an earlier one through `twice`.
pub(crate) fn resolve_column_list<'a, S, M, T>(
    table: &TableRef<'a>,
    names: &[S],
    missing: M,
    twice: T,
) -> Result<Vec<ColumnRef<'a>>>
where
    S: AsRef<str>,
    M: Fn(&str) -> SchemaError,
    T: Fn(&str) -> SchemaError,
{
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let column = table.find_column(name).ok_or_else(|| missing(name))?;
        if !seen.insert(name) {
            return Err(twice(name));
        }
        columns.push(column);
    }
    Ok(columns)
}
