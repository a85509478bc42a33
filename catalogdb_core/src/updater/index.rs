use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::dialect::KeyOrdering;
use crate::error::{Result, SchemaError};
use crate::parser::command::CreateIndex;
use crate::schema::node::{Column, Index, Interleave, KeyColumn, Table};
use crate::schema::resolve::{resolve_column_list, resolve_table};
use crate::schema::{
    ColumnRef, NodeId, OnDeleteAction, Schema, SchemaGraph, SchemaNode, TableRef,
    INDEX_DATA_TABLE_PREFIX,
};

use super::interleave::validate_interleave;

/// One primary-key part of an index data table, before node ids exist.
struct DataKeyPart<'a> {
    source: ColumnRef<'a>,
    ordering: KeyOrdering,
    /// Explicit key of a null-filtered index.
    forced_not_null: bool,
}

/// Validates a `CREATE INDEX` against `schema` and returns the graph with the
/// new index and its data table added. `None` means the statement was a
/// no-op (`IF NOT EXISTS` on an existing index).
#[instrument(name = "updater::create_index", level = "debug", skip(schema, stmt), fields(index = %stmt.name, table = %stmt.table))]
pub fn build_index(schema: &Schema, stmt: &CreateIndex) -> Result<Option<SchemaGraph>> {
    if stmt.if_not_exists && schema.find_index(&stmt.name).is_some() {
        debug!("index already exists, skipping");
        return Ok(None);
    }

    let table = resolve_table(schema, &stmt.table)?;

    let key_names: Vec<&str> = stmt.key_parts.iter().map(|k| k.column.as_str()).collect();
    let key_columns = resolve_column_list(
        &table,
        &key_names[..],
        |column| SchemaError::IndexRefsNonExistentColumn {
            index: stmt.name.clone(),
            column: column.to_string(),
        },
        |column| SchemaError::IndexRefsColumnTwice {
            index: stmt.name.clone(),
            column: column.to_string(),
        },
    )?;

    for column in &key_columns {
        let data_type = column.data_type();
        if !data_type.is_indexable() {
            return Err(SchemaError::CannotCreateIndexOnColumn {
                index: stmt.name.clone(),
                column: column.name().to_string(),
                type_name: data_type.type_name().to_string(),
            });
        }
    }

    let stored_columns = resolve_stored_columns(stmt, &table, &key_names)?;

    if key_columns.is_empty() {
        return Err(SchemaError::IndexWithNoKeys(stmt.name.clone()));
    }

    let parent = match &stmt.interleave_in {
        Some(parent_name) => {
            let parent = resolve_table(schema, parent_name)?;
            validate_interleave(&stmt.name, &parent, &table)?;
            Some(parent)
        }
        None => None,
    };

    let dialect = schema.dialect();
    let mut key_parts: Vec<DataKeyPart<'_>> = stmt
        .key_parts
        .iter()
        .zip(key_columns.iter())
        .map(|(part, column)| DataKeyPart {
            source: *column,
            ordering: dialect.key_ordering(part.direction, part.nulls),
            forced_not_null: stmt.null_filtered,
        })
        .collect();

    // Table key columns the index does not already list, in table order.
    let explicit: BTreeSet<NodeId> = key_columns.iter().map(|c| c.id()).collect();
    for table_key in table.primary_key() {
        if let Some(column) = table_key.column() {
            if !explicit.contains(&column.id()) {
                key_parts.push(DataKeyPart {
                    source: column,
                    ordering: table_key.ordering(),
                    forced_not_null: false,
                });
            }
        }
    }

    let mut graph = schema.graph().clone();
    let index_id = graph.allocate_id();
    let data_table_id = graph.allocate_id();

    let mut data_columns: Vec<NodeId> = Vec::with_capacity(key_parts.len() + stored_columns.len());
    let mut data_key: Vec<NodeId> = Vec::with_capacity(key_parts.len());

    for part in &key_parts {
        let column_id = add_data_column(&mut graph, data_table_id, &part.source, part.forced_not_null)?;
        let key_id = graph.allocate_id();
        graph.insert(SchemaNode::KeyColumn(KeyColumn {
            id: key_id,
            column: column_id,
            column_name: part.source.name().to_string(),
            ordering: part.ordering,
        }))?;
        data_columns.push(column_id);
        data_key.push(key_id);
    }

    let mut stored: Vec<NodeId> = Vec::with_capacity(stored_columns.len());
    for source in &stored_columns {
        let column_id = add_data_column(&mut graph, data_table_id, source, false)?;
        data_columns.push(column_id);
        stored.push(column_id);
    }

    graph.insert(SchemaNode::IndexDataTable(Table {
        id: data_table_id,
        name: format!("{INDEX_DATA_TABLE_PREFIX}{}", stmt.name),
        columns: data_columns,
        primary_key: data_key.clone(),
        interleave: parent.map(|p| Interleave {
            parent: p.id(),
            on_delete: OnDeleteAction::Cascade,
        }),
        owner_index: Some(index_id),
    }))?;

    graph.insert(SchemaNode::Index(Index {
        id: index_id,
        name: stmt.name.clone(),
        indexed_table: table.id(),
        key_columns: data_key[..key_columns.len()].to_vec(),
        stored_columns: stored,
        is_unique: stmt.unique,
        is_null_filtered: stmt.null_filtered,
        parent: parent.map(|p| p.id()),
        data_table: data_table_id,
    }))?;

    debug!(
        keys = key_columns.len(),
        data_key = data_key.len(),
        stored = stored_columns.len(),
        "built index"
    );
    Ok(Some(graph))
}

fn resolve_stored_columns<'a>(
    stmt: &CreateIndex,
    table: &TableRef<'a>,
    key_names: &[&str],
) -> Result<Vec<ColumnRef<'a>>> {
    let table_key: BTreeSet<&str> = table
        .primary_key()
        .iter()
        .map(|k| k.column_name())
        .collect();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut columns = Vec::with_capacity(stmt.stored_columns.len());

    for name in &stmt.stored_columns {
        let name = name.as_str();
        let column = table
            .find_column(name)
            .ok_or_else(|| SchemaError::IndexRefsNonExistentColumn {
                index: stmt.name.clone(),
                column: name.to_string(),
            })?;
        if key_names.contains(&name) {
            return Err(SchemaError::IndexRefsKeyAsStoredColumn {
                index: stmt.name.clone(),
                column: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(SchemaError::IndexRefsColumnTwice {
                index: stmt.name.clone(),
                column: name.to_string(),
            });
        }
        if table_key.contains(name) {
            return Err(SchemaError::IndexRefsTableKeyAsStoredColumn {
                index: stmt.name.clone(),
                column: name.to_string(),
            });
        }
        columns.push(column);
    }
    Ok(columns)
}

/// Adds a data-table column projecting `source`.
fn add_data_column(
    graph: &mut SchemaGraph,
    data_table: NodeId,
    source: &ColumnRef<'_>,
    forced_not_null: bool,
) -> Result<NodeId> {
    let id = graph.allocate_id();
    graph.insert(SchemaNode::Column(Column {
        id,
        name: source.name().to_string(),
        table: data_table,
        data_type: source.data_type(),
        is_nullable: source.is_nullable() && !forced_not_null,
        source_column: Some(source.id()),
    }))?;
    Ok(id)
}
