use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use crate::error::{Result, SchemaError};
use crate::parser::command::{CreateTable, DropTable};
use crate::schema::node::{Column, Interleave, KeyColumn, Table};
use crate::schema::resolve::resolve_table;
use crate::schema::{NodeId, OnDeleteAction, Schema, SchemaGraph, SchemaNode, TableRef};
use crate::types::DataType;

use super::drop::validate_drop_table;

#[instrument(name = "updater::create_table", level = "debug", skip(schema, stmt), fields(table = %stmt.name))]
pub fn create_table(schema: &Schema, stmt: &CreateTable) -> Result<Option<SchemaGraph>> {
    if stmt.if_not_exists && schema.find_table(&stmt.name).is_some() {
        debug!("table already exists, skipping");
        return Ok(None);
    }

    // name -> (position, type)
    let mut declared: BTreeMap<&str, (usize, DataType)> = BTreeMap::new();
    for (pos, column) in stmt.columns.iter().enumerate() {
        if declared.insert(column.name.as_str(), (pos, column.data_type)).is_some() {
            return Err(SchemaError::DuplicateColumnName {
                table: stmt.name.clone(),
                column: column.name.clone(),
            });
        }
    }

    let mut key_positions: Vec<usize> = Vec::with_capacity(stmt.primary_key.len());
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for part in &stmt.primary_key {
        let name = part.column.as_str();
        let (pos, data_type) = *declared.get(name).ok_or_else(|| {
            SchemaError::PrimaryKeyRefsNonExistentColumn {
                table: stmt.name.clone(),
                column: name.to_string(),
            }
        })?;
        if !seen.insert(name) {
            return Err(SchemaError::PrimaryKeyRefsColumnTwice {
                table: stmt.name.clone(),
                column: name.to_string(),
            });
        }
        if !data_type.is_indexable() {
            return Err(SchemaError::InvalidPrimaryKeyColumnType {
                table: stmt.name.clone(),
                column: name.to_string(),
                type_name: data_type.type_name().to_string(),
            });
        }
        key_positions.push(pos);
    }

    let interleave = match &stmt.interleave {
        Some(def) => {
            let parent = resolve_table(schema, &def.parent)?;
            validate_parent_key(stmt, &parent)?;
            Some((parent.id(), def.on_delete.unwrap_or(OnDeleteAction::NoAction)))
        }
        None => None,
    };

    let dialect = schema.dialect();
    let key_implies_not_null = dialect.options().primary_key_implies_not_null;

    let mut graph = schema.graph().clone();
    let table_id = graph.allocate_id();

    let mut columns: Vec<NodeId> = Vec::with_capacity(stmt.columns.len());
    for (pos, def) in stmt.columns.iter().enumerate() {
        let id = graph.allocate_id();
        let not_null = def.not_null || (key_implies_not_null && key_positions.contains(&pos));
        graph.insert(SchemaNode::Column(Column {
            id,
            name: def.name.clone(),
            table: table_id,
            data_type: def.data_type,
            is_nullable: !not_null,
            source_column: None,
        }))?;
        columns.push(id);
    }

    let mut primary_key: Vec<NodeId> = Vec::with_capacity(key_positions.len());
    for (part, pos) in stmt.primary_key.iter().zip(key_positions.iter()) {
        let id = graph.allocate_id();
        graph.insert(SchemaNode::KeyColumn(KeyColumn {
            id,
            column: columns[*pos],
            column_name: part.column.clone(),
            ordering: dialect.key_ordering(part.direction, part.nulls),
        }))?;
        primary_key.push(id);
    }

    graph.insert(SchemaNode::Table(Table {
        id: table_id,
        name: stmt.name.clone(),
        columns,
        primary_key,
        interleave: interleave.map(|(parent, on_delete)| Interleave { parent, on_delete }),
        owner_index: None,
    }))?;

    debug!(columns = stmt.columns.len(), keys = key_positions.len(), "created table");
    Ok(Some(graph))
}

/// The parent's key columns must open the child's key, position by position,
/// with the same names and types.
fn validate_parent_key(stmt: &CreateTable, parent: &TableRef<'_>) -> Result<()> {
    for (pos, parent_key) in parent.primary_key().iter().enumerate() {
        let parent_type = parent_key.column().map(|c| c.data_type());
        let matches = stmt.primary_key.get(pos).is_some_and(|part| {
            part.column == parent_key.column_name()
                && stmt
                    .columns
                    .iter()
                    .find(|c| c.name == part.column)
                    .map(|c| c.data_type)
                    == parent_type
        });
        if !matches {
            return Err(SchemaError::MustReferenceParentKeyColumn {
                table: stmt.name.clone(),
                parent: parent.name().to_string(),
                column: parent_key.column_name().to_string(),
            });
        }
    }
    Ok(())
}

#[instrument(name = "updater::drop_table", level = "debug", skip(schema, stmt), fields(table = %stmt.name))]
pub fn drop_table(schema: &Schema, stmt: &DropTable) -> Result<Option<SchemaGraph>> {
    let table = match resolve_table(schema, &stmt.name) {
        Ok(table) => table,
        Err(SchemaError::TableNotFound(_)) if stmt.if_exists => {
            debug!("table does not exist, nothing to drop");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    validate_drop_table(&table)?;

    let mut graph = schema.graph().clone();
    let removed = graph.remove(table.id());
    debug!(removed = removed.len(), "dropped table");
    Ok(Some(graph))
}
