//! Statement application. Every statement consumes one snapshot and yields
//! the next; a rejected statement leaves its input snapshot untouched.

pub mod drop;
pub mod index;
pub mod interleave;
pub mod table;

pub use drop::{drop_index, validate_drop_table};
pub use index::build_index;
pub use interleave::{interleave_chain, validate_interleave};
pub use table::{create_table, drop_table};

use tracing::{debug, instrument, warn};

use crate::dialect::Dialect;
use crate::error::{Result, SchemaError};
use crate::parser::command::DdlStatement;
use crate::schema::Schema;

/// Result of applying a batch that may stop part-way.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Last committed snapshot: the input when nothing was applied.
    pub schema: Schema,
    /// Number of statements that succeeded, no-ops included.
    pub applied: usize,
    /// Failure of statement number `applied`, if any.
    pub error: Option<SchemaError>,
    /// Every snapshot the batch committed, oldest first. No-ops add none.
    pub committed: Vec<Schema>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Builds a schema from scratch.
pub fn create_schema(statements: &[DdlStatement], dialect: Dialect) -> Result<Schema> {
    update_schema(&Schema::empty(dialect), statements)
}

/// Applies every statement in order, failing on the first rejected one.
pub fn update_schema(schema: &Schema, statements: &[DdlStatement]) -> Result<Schema> {
    let outcome = apply_batch(schema, statements);
    match outcome.error {
        Some(e) => Err(e),
        None => Ok(outcome.schema),
    }
}

#[instrument(name = "updater::apply_batch", level = "debug", skip_all, fields(version = schema.version(), statements = statements.len()))]
pub fn apply_batch(schema: &Schema, statements: &[DdlStatement]) -> BatchOutcome {
    let mut current = schema.clone();
    let mut committed = Vec::new();
    for (applied, statement) in statements.iter().enumerate() {
        match apply_statement(&current, statement) {
            Ok(next) => {
                if next.version() != current.version() {
                    committed.push(next.clone());
                }
                current = next;
            }
            Err(error) => {
                warn!(
                    applied,
                    statement = statement.kind(),
                    name = statement.object_name(),
                    %error,
                    "statement rejected"
                );
                return BatchOutcome {
                    schema: current,
                    applied,
                    error: Some(error),
                    committed,
                };
            }
        }
    }
    BatchOutcome {
        schema: current,
        applied: statements.len(),
        error: None,
        committed,
    }
}

/// Applies one statement. No-op statements return the input snapshot with
/// its version unchanged.
pub fn apply_statement(schema: &Schema, statement: &DdlStatement) -> Result<Schema> {
    let dialect = schema.dialect();
    if statement.has_existence_modifier() && !dialect.options().supports_if_not_exists {
        return Err(SchemaError::IfExistsNotSupported(dialect));
    }

    let next = match statement {
        DdlStatement::CreateTable(stmt) => create_table(schema, stmt)?,
        DdlStatement::CreateIndex(stmt) => build_index(schema, stmt)?,
        DdlStatement::DropTable(stmt) => drop_table(schema, stmt)?,
        DdlStatement::DropIndex(stmt) => drop_index(schema, stmt)?,
    };

    let Some(graph) = next else {
        return Ok(schema.clone());
    };
    graph.check_touched()?;
    let graph = graph.seal();

    let version = schema.version() + 1;
    debug!(
        statement = statement.kind(),
        name = statement.object_name(),
        version,
        nodes = graph.len(),
        "committed schema"
    );
    Ok(Schema::from_parts(graph, dialect, version))
}
