use thiserror::Error;

use crate::dialect::Dialect;
use crate::schema::NodeId;

/// Validation failures raised while applying a DDL statement to a schema.
///
/// Every variant carries the names involved so callers can match on the
/// exact failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Index {0} does not specify any key columns")]
    IndexWithNoKeys(String),

    #[error("Index {index} references column {column} which does not exist in its base table")]
    IndexRefsNonExistentColumn { index: String, column: String },

    #[error("Index {index} references column {column} more than once")]
    IndexRefsColumnTwice { index: String, column: String },

    #[error("Index {index} specifies stored column {column} which is already a key column of the index")]
    IndexRefsKeyAsStoredColumn { index: String, column: String },

    #[error("Index {index} specifies stored column {column} which is a primary key column of its base table")]
    IndexRefsTableKeyAsStoredColumn { index: String, column: String },

    #[error("Index {index} cannot use column {column} of type {type_name} as a key column")]
    CannotCreateIndexOnColumn {
        index: String,
        column: String,
        type_name: String,
    },

    #[error("Cannot interleave index {index} of table {table} within table {parent} because {parent} is not an ancestor of {table}")]
    IndexInterleaveTableUnacceptable {
        index: String,
        table: String,
        parent: String,
    },

    #[error("Cannot drop table {table} with indices: {index}")]
    DropTableWithDependentIndices { table: String, index: String },

    #[error("Cannot drop table {table} with interleaved tables: {child}")]
    DropTableWithInterleavedTables { table: String, child: String },

    #[error("Duplicate name in schema: {kind} {name}")]
    SchemaObjectAlreadyExists { kind: String, name: String },

    #[error("Table {table} has more than one column named {column}")]
    DuplicateColumnName { table: String, column: String },

    #[error("Table {table} references nonexistent key column {column}")]
    PrimaryKeyRefsNonExistentColumn { table: String, column: String },

    #[error("Table {table} references key column {column} more than once")]
    PrimaryKeyRefsColumnTwice { table: String, column: String },

    #[error("Column {column} of table {table} has type {type_name}, which cannot be part of a primary key")]
    InvalidPrimaryKeyColumnType {
        table: String,
        column: String,
        type_name: String,
    },

    #[error("Table {table} must reference the primary key column {column} of its parent table {parent} in the same position and with the same type")]
    MustReferenceParentKeyColumn {
        table: String,
        parent: String,
        column: String,
    },

    #[error("IF [NOT] EXISTS is not supported in the {0} dialect")]
    IfExistsNotSupported(Dialect),

    #[error("Schema node {node} references missing node {target}")]
    DanglingReference { node: String, target: NodeId },
}

/// Errors produced while turning DDL text into statements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty statement")]
    Empty,

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Unknown type '{0}'")]
    UnknownType(String),

    #[error("{feature} is not supported in the {dialect} dialect")]
    Unsupported { feature: String, dialect: Dialect },

    #[error("Unknown dialect '{0}'. Use googlesql|postgresql")]
    UnknownDialect(String),
}

/// Error returned by the [`Catalog`](crate::Catalog) facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

pub type Result<T, E = SchemaError> = std::result::Result<T, E>;
