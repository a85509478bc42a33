use tracing::{debug, instrument};

use crate::error::{Result, SchemaError};
use crate::parser::command::DropIndex;
use crate::schema::resolve::resolve_index;
use crate::schema::{Schema, SchemaGraph, TableRef};

/// Refuses to drop a table that still has indexes over it or tables
/// interleaved in it. Indexes are reported first, oldest first.
pub fn validate_drop_table(table: &TableRef<'_>) -> Result<()> {
    if let Some(index) = table.indexes().first() {
        return Err(SchemaError::DropTableWithDependentIndices {
            table: table.name().to_string(),
            index: index.name().to_string(),
        });
    }
    if let Some(child) = table.children().first() {
        return Err(SchemaError::DropTableWithInterleavedTables {
            table: table.name().to_string(),
            child: child.name().to_string(),
        });
    }
    Ok(())
}

/// Removes an index together with its data table. `None` means the
/// statement was a no-op (`IF EXISTS` on a missing index).
#[instrument(name = "updater::drop_index", level = "debug", skip(schema, stmt), fields(index = %stmt.name))]
pub fn drop_index(schema: &Schema, stmt: &DropIndex) -> Result<Option<SchemaGraph>> {
    let index = match resolve_index(schema, &stmt.name) {
        Ok(index) => index,
        Err(SchemaError::IndexNotFound(_)) if stmt.if_exists => {
            debug!("index does not exist, nothing to drop");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let mut graph = schema.graph().clone();
    let removed = graph.remove(index.id());
    debug!(removed = removed.len(), "dropped index");
    Ok(Some(graph))
}
