pub mod dialect;
pub mod error;
pub mod parser;
pub mod schema;
pub mod types;
pub mod updater;

pub use dialect::{Dialect, DialectOptions, KeyOrdering, NullOrdering, SortDirection};
pub use error::{Error, ParseError, SchemaError};
pub use parser::DdlStatement;
pub use schema::{ColumnRef, IndexRef, KeyColumnRef, Schema, TableRef};
pub use updater::{apply_batch, create_schema, update_schema, BatchOutcome};

use tracing::info;

/// Owns the current snapshot of one catalog together with every snapshot it
/// committed before.
#[derive(Debug)]
pub struct Catalog {
    dialect: Dialect,
    current: Schema,
    history: Vec<Schema>,
}

impl Catalog {
    pub fn new(dialect: Dialect) -> Self {
        let empty = Schema::empty(dialect);
        Self {
            dialect,
            current: empty.clone(),
            history: vec![empty],
        }
    }

    /// Parses and applies a `;`-separated DDL batch.
    ///
    /// Statements before a failing one stay committed and each of their
    /// snapshots is recorded in the history.
    pub fn execute(&mut self, input: &str) -> Result<String, Error> {
        let statements = parser::parse_batch(input, self.dialect)?;
        if statements.is_empty() {
            return Err(ParseError::Empty.into());
        }

        let start = self.current.version();
        let BatchOutcome {
            schema,
            committed,
            error,
            ..
        } = updater::apply_batch(&self.current, &statements);
        self.history.extend(committed);
        self.current = schema;
        if let Some(error) = error {
            return Err(error.into());
        }

        let version = self.current.version();
        info!(statements = statements.len(), version, "executed ddl batch");
        Ok(match statements.as_slice() {
            [single] if version == start => {
                format!("{} {}: no change", single.kind(), single.object_name())
            }
            [single] => format!("{} {} (version {version})", single.kind(), single.object_name()),
            many => format!("Applied {} statements (version {version})", many.len()),
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The most recent snapshot.
    pub fn schema(&self) -> &Schema {
        &self.current
    }

    /// The snapshot that carried `version`, if it was ever committed here.
    pub fn snapshot(&self, version: u64) -> Option<&Schema> {
        self.history.iter().find(|s| s.version() == version)
    }

    /// Every committed snapshot, oldest first, starting with the empty one.
    pub fn history(&self) -> &[Schema] {
        &self.history
    }
}
