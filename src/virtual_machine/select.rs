use tracing::instrument;

use crate::backend::cursor::Cursor;
use crate::backend::table::Table;

use super::vm_error::ExecuteError;

/// Scans the table from the start and prints each row as `(id, username, email)`.
#[instrument(skip_all)]
pub(super) fn process_select(table: &mut Table) -> Result<(), ExecuteError> {
    let mut cursor = Cursor::table_start(table)?;
    while !cursor.end_of_table {
        println!("{}", cursor.value());
        cursor.advance();
    }
    Ok(())
}
