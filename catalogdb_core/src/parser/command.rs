use crate::dialect::{NullOrdering, SortDirection};
use crate::schema::OnDeleteAction;
use crate::types::DataType;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    pub not_null: bool,
}

/// One key part as written: direction and null ordering are `None` when the
/// statement leaves them to the dialect default.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPartDef {
    pub column: String,
    pub direction: Option<SortDirection>,
    pub nulls: Option<NullOrdering>,
}

impl KeyPartDef {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: None,
            nulls: None,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            direction: Some(SortDirection::Asc),
            ..Self::new(column)
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            direction: Some(SortDirection::Desc),
            ..Self::new(column)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterleaveDef {
    pub parent: String,
    /// `None` when no `ON DELETE` clause was given.
    pub on_delete: Option<OnDeleteAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub primary_key: Vec<KeyPartDef>,
    pub interleave: Option<InterleaveDef>,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    pub name: String,
    pub table: String,
    pub key_parts: Vec<KeyPartDef>,
    pub stored_columns: Vec<String>,
    pub unique: bool,
    pub null_filtered: bool,
    pub interleave_in: Option<String>,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    pub name: String,
    pub if_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropIndex {
    pub name: String,
    pub if_exists: bool,
}

/// A parsed DDL statement, as consumed by the schema updater.
#[derive(Debug, Clone, PartialEq)]
pub enum DdlStatement {
    CreateTable(CreateTable),
    CreateIndex(CreateIndex),
    DropTable(DropTable),
    DropIndex(DropIndex),
}

impl DdlStatement {
    /// Short statement label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DdlStatement::CreateTable(_) => "CREATE TABLE",
            DdlStatement::CreateIndex(_) => "CREATE INDEX",
            DdlStatement::DropTable(_) => "DROP TABLE",
            DdlStatement::DropIndex(_) => "DROP INDEX",
        }
    }

    /// Name of the object the statement creates or drops.
    pub fn object_name(&self) -> &str {
        match self {
            DdlStatement::CreateTable(s) => &s.name,
            DdlStatement::CreateIndex(s) => &s.name,
            DdlStatement::DropTable(s) => &s.name,
            DdlStatement::DropIndex(s) => &s.name,
        }
    }

    /// Whether the statement carries an `IF [NOT] EXISTS` modifier.
    pub fn has_existence_modifier(&self) -> bool {
        match self {
            DdlStatement::CreateTable(s) => s.if_not_exists,
            DdlStatement::CreateIndex(s) => s.if_not_exists,
            DdlStatement::DropTable(s) => s.if_exists,
            DdlStatement::DropIndex(s) => s.if_exists,
        }
    }
}
