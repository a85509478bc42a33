use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

/// Declared length of a STRING/BYTES column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Length {
    Max,
    Limit(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    Bool,
    Int64,
    Float64,
    Numeric,
    String(Length),
    Bytes(Length),
    Date,
    Timestamp,
    Json,
}

/// Semantic column type: a scalar, or an array of scalars. Arrays of arrays
/// cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Scalar(ScalarType),
    Array(ScalarType),
}

impl ScalarType {
    /// Whether values of this type have a total order usable in a key.
    pub fn is_orderable(&self) -> bool {
        !matches!(self, ScalarType::Json)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarType::Bool => "BOOL",
            ScalarType::Int64 => "INT64",
            ScalarType::Float64 => "FLOAT64",
            ScalarType::Numeric => "NUMERIC",
            ScalarType::String(_) => "STRING",
            ScalarType::Bytes(_) => "BYTES",
            ScalarType::Date => "DATE",
            ScalarType::Timestamp => "TIMESTAMP",
            ScalarType::Json => "JSON",
        }
    }
}

impl DataType {
    /// Whether a column of this type may be part of a primary key or an
    /// index key.
    pub fn is_indexable(&self) -> bool {
        match self {
            DataType::Scalar(s) => s.is_orderable(),
            DataType::Array(_) => false,
        }
    }

    /// Type kind name used in error messages (`ARRAY`, `JSON`, `INT64`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Scalar(s) => s.type_name(),
            DataType::Array(_) => "ARRAY",
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, DataType::Array(_))
    }
}

fn fmt_length(f: &mut fmt::Formatter<'_>, len: &Length) -> fmt::Result {
    match len {
        Length::Max => write!(f, "(MAX)"),
        Length::Limit(n) => write!(f, "({n})"),
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())?;
        match self {
            ScalarType::String(len) | ScalarType::Bytes(len) => fmt_length(f, len),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Scalar(s) => write!(f, "{s}"),
            DataType::Array(s) => write!(f, "ARRAY<{s}>"),
        }
    }
}

/// Resolves a single-word scalar type name in the given dialect.
///
/// Length-carrying types (`STRING(n)`, `varchar(n)`) and multi-word names
/// (`double precision`) are assembled by the parser before calling this; the
/// name passed here is the base keyword only.
pub fn parse_scalar(dialect: Dialect, name: &str) -> Option<ScalarType> {
    let lower = name.to_ascii_lowercase();
    match dialect {
        Dialect::GoogleSql => match lower.as_str() {
            "bool" => Some(ScalarType::Bool),
            "int64" => Some(ScalarType::Int64),
            "float64" => Some(ScalarType::Float64),
            "numeric" => Some(ScalarType::Numeric),
            "string" => Some(ScalarType::String(Length::Max)),
            "bytes" => Some(ScalarType::Bytes(Length::Max)),
            "date" => Some(ScalarType::Date),
            "timestamp" => Some(ScalarType::Timestamp),
            "json" => Some(ScalarType::Json),
            _ => None,
        },
        Dialect::PostgreSql => match lower.as_str() {
            "boolean" | "bool" => Some(ScalarType::Bool),
            "bigint" | "int8" => Some(ScalarType::Int64),
            "float8" => Some(ScalarType::Float64),
            "numeric" | "decimal" => Some(ScalarType::Numeric),
            "varchar" | "text" => Some(ScalarType::String(Length::Max)),
            "bytea" => Some(ScalarType::Bytes(Length::Max)),
            "date" => Some(ScalarType::Date),
            "timestamptz" => Some(ScalarType::Timestamp),
            "jsonb" => Some(ScalarType::Json),
            _ => None,
        },
    }
}

/// Whether the scalar type accepts a `(n)` / `(MAX)` length suffix.
pub fn takes_length(scalar: &ScalarType) -> bool {
    matches!(scalar, ScalarType::String(_) | ScalarType::Bytes(_))
}

pub fn with_length(scalar: ScalarType, len: Length) -> ScalarType {
    match scalar {
        ScalarType::String(_) => ScalarType::String(len),
        ScalarType::Bytes(_) => ScalarType::Bytes(len),
        other => other,
    }
}
