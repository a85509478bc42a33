use tracing::instrument;

use crate::error::{Result, SchemaError};
use crate::schema::TableRef;

/// `table` followed by its interleave parents, nearest first.
pub fn interleave_chain<'a>(table: &TableRef<'a>) -> Vec<TableRef<'a>> {
    let mut chain = vec![*table];
    let mut current = table.parent();
    while let Some(parent) = current {
        // Parents always predate their children, so the walk terminates.
        if chain.contains(&parent) {
            break;
        }
        current = parent.parent();
        chain.push(parent);
    }
    chain
}

/// Checks that an index on `child_table` may be interleaved in
/// `requested_parent`: the parent must be the table itself or one of its
/// interleave ancestors.
#[instrument(
    name = "updater::interleave::validate",
    level = "trace",
    skip(requested_parent, child_table),
    fields(parent = requested_parent.name(), table = child_table.name())
)]
pub fn validate_interleave(
    index_name: &str,
    requested_parent: &TableRef<'_>,
    child_table: &TableRef<'_>,
) -> Result<()> {
    if interleave_chain(child_table).contains(requested_parent) {
        return Ok(());
    }
    Err(SchemaError::IndexInterleaveTableUnacceptable {
        index: index_name.to_string(),
        table: child_table.name().to_string(),
        parent: requested_parent.name().to_string(),
    })
}
