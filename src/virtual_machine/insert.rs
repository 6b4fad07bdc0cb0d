use tracing::instrument;

use crate::backend::cursor::Cursor;
use crate::backend::page::LEAF_NODE_MAX_CELLS;
use crate::backend::row::Row;
use crate::backend::table::Table;
use crate::sql_compiler::InsertTokens;

use super::vm_error::{ExecuteError, VMError};

/// Appends a row at the cursor's table-end position. Keys are not kept in sorted order; the
/// present design always appends (see the leaf-splitting extension point in the storage stack).
#[instrument(skip_all, fields(id = tokens.id))]
pub(super) fn process_insert(tokens: InsertTokens, table: &mut Table) -> Result<(), ExecuteError> {
    if table.root_num_cells()? as usize >= LEAF_NODE_MAX_CELLS {
        return Err(VMError::TableFull.into());
    }

    let row = Row::new(tokens.id, tokens.username, tokens.email)?;

    let mut cursor = Cursor::table_end(table)?;
    cursor.insert(tokens.id, &row)?;
    Ok(())
}
