use thiserror::Error;

use crate::backend::cursor::CursorError;
use crate::backend::page::PageError;
use crate::backend::row::RowError;
use crate::backend::table::TableError;

/// Recoverable half of the two-tier error model: the REPL prints the message and loops.
/// Everything else a statement's execution can fail with is promoted to [`ExecuteError::Fatal`]
/// and propagates to `main`, since the storage stack offers no rollback to recover into.
#[derive(Error, Debug)]
pub enum VMError {
    #[error("Error: Table full.")]
    TableFull,
}

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error(transparent)]
    Recoverable(#[from] VMError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Row(#[from] RowError),
}

impl ExecuteError {
    /// Table-full is the sole recoverable outcome; everything else is fatal.
    pub fn as_recoverable(&self) -> Option<&VMError> {
        match self {
            ExecuteError::Recoverable(err) => Some(err),
            _ => None,
        }
    }
}
