use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// SQL dialect the catalog was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    GoogleSql = 0,
    PostgreSql = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullOrdering {
    NullsFirst,
    NullsLast,
}

/// Fully resolved ordering of one key part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyOrdering {
    pub direction: SortDirection,
    pub nulls: NullOrdering,
}

impl KeyOrdering {
    const fn new(direction: SortDirection, nulls: NullOrdering) -> Self {
        Self { direction, nulls }
    }
}

/// Default ordering for a key part, indexed by the direction written in the
/// statement (none, ASC, DESC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingPolicy {
    pub unspecified: KeyOrdering,
    pub asc: KeyOrdering,
    pub desc: KeyOrdering,
}

/// Per-dialect behaviour switches consulted by the parser and the updater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectOptions {
    pub dialect: Dialect,
    pub name: &'static str,
    /// Character delimiting a quoted identifier.
    pub identifier_quote: char,
    /// Inside a quoted identifier a doubled quote stands for one quote and
    /// `\` is literal. Otherwise `\` escapes the quote or itself.
    pub doubled_quote_escape: bool,
    pub supports_if_not_exists: bool,
    pub supports_null_filtered: bool,
    pub allows_empty_index_keys: bool,
    pub primary_key_implies_not_null: bool,
    pub ordering: OrderingPolicy,
}

use NullOrdering::{NullsFirst, NullsLast};
use SortDirection::{Asc, Desc};

static DIALECT_OPTIONS: [DialectOptions; 2] = [
    DialectOptions {
        dialect: Dialect::GoogleSql,
        name: "GoogleSQL",
        identifier_quote: '`',
        doubled_quote_escape: false,
        supports_if_not_exists: true,
        supports_null_filtered: true,
        allows_empty_index_keys: true,
        primary_key_implies_not_null: false,
        ordering: OrderingPolicy {
            unspecified: KeyOrdering::new(Asc, NullsFirst),
            asc: KeyOrdering::new(Asc, NullsFirst),
            desc: KeyOrdering::new(Desc, NullsLast),
        },
    },
    DialectOptions {
        dialect: Dialect::PostgreSql,
        name: "PostgreSQL",
        identifier_quote: '"',
        doubled_quote_escape: true,
        supports_if_not_exists: false,
        supports_null_filtered: false,
        allows_empty_index_keys: false,
        primary_key_implies_not_null: true,
        ordering: OrderingPolicy {
            unspecified: KeyOrdering::new(Asc, NullsLast),
            asc: KeyOrdering::new(Asc, NullsLast),
            desc: KeyOrdering::new(Desc, NullsLast),
        },
    },
];

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::GoogleSql, Dialect::PostgreSql];

    pub fn options(self) -> &'static DialectOptions {
        &DIALECT_OPTIONS[self as usize]
    }

    /// Resolves the ordering of a key part from what the statement spelled
    /// out. An explicit null ordering always wins over the policy default.
    pub fn key_ordering(
        self,
        direction: Option<SortDirection>,
        nulls: Option<NullOrdering>,
    ) -> KeyOrdering {
        let policy = &self.options().ordering;
        let default = match direction {
            None => policy.unspecified,
            Some(Asc) => policy.asc,
            Some(Desc) => policy.desc,
        };
        KeyOrdering {
            direction: default.direction,
            nulls: nulls.unwrap_or(default.nulls),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.options().name)
    }
}

impl FromStr for Dialect {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "googlesql" | "google_standard_sql" | "gsql" => Ok(Dialect::GoogleSql),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSql),
            other => Err(ParseError::UnknownDialect(other.to_string())),
        }
    }
}
