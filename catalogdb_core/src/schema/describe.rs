use serde::Serialize;

use crate::dialect::{Dialect, NullOrdering, SortDirection};

use super::node::OnDeleteAction;
use super::view::{IndexRef, KeyColumnRef, TableRef};
use super::Schema;

/// Serializable view of a snapshot, for display and inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDescription {
    pub dialect: Dialect,
    pub version: u64,
    pub tables: Vec<TableDescription>,
    pub indexes: Vec<IndexDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDescription {
    pub name: String,
    pub columns: Vec<ColumnDescription>,
    pub primary_key: Vec<KeyPartDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interleave_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<OnDeleteAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyPartDescription {
    pub column: String,
    pub direction: SortDirection,
    pub nulls: NullOrdering,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDescription {
    pub name: String,
    pub table: String,
    pub unique: bool,
    pub null_filtered: bool,
    pub key_columns: Vec<KeyPartDescription>,
    pub stored_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interleave_in: Option<String>,
    pub data_table: TableDescription,
}

fn describe_key(key: &KeyColumnRef<'_>) -> KeyPartDescription {
    let ordering = key.ordering();
    KeyPartDescription {
        column: key.column_name().to_string(),
        direction: ordering.direction,
        nulls: ordering.nulls,
    }
}

fn describe_table(table: &TableRef<'_>) -> TableDescription {
    TableDescription {
        name: table.name().to_string(),
        columns: table
            .columns()
            .iter()
            .map(|c| ColumnDescription {
                name: c.name().to_string(),
                data_type: c.data_type().to_string(),
                nullable: c.is_nullable(),
            })
            .collect(),
        primary_key: table.primary_key().iter().map(describe_key).collect(),
        interleave_in: table.parent().map(|p| p.name().to_string()),
        on_delete: table.on_delete(),
    }
}

fn describe_index(index: &IndexRef<'_>) -> Option<IndexDescription> {
    let table = index.indexed_table()?;
    let data_table = index.index_data_table()?;
    Some(IndexDescription {
        name: index.name().to_string(),
        table: table.name().to_string(),
        unique: index.is_unique(),
        null_filtered: index.is_null_filtered(),
        key_columns: index.key_columns().iter().map(describe_key).collect(),
        stored_columns: index
            .stored_columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
        interleave_in: index.parent().map(|p| p.name().to_string()),
        data_table: describe_table(&data_table),
    })
}

impl Schema {
    pub fn describe(&self) -> SchemaDescription {
        SchemaDescription {
            dialect: self.dialect(),
            version: self.version(),
            tables: self.tables().iter().map(describe_table).collect(),
            indexes: self.indexes().iter().filter_map(describe_index).collect(),
        }
    }

    /// Pretty-printed JSON rendering of [`Schema::describe`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.describe())
    }
}
