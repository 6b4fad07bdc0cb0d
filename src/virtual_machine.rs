mod insert;
mod select;
mod vm_error;

use crate::backend::table::Table;
use crate::sql_compiler::Statement;

pub use vm_error::{ExecuteError, VMError};

pub fn execute_statement(statement: Statement, table: &mut Table) -> Result<(), ExecuteError> {
    match statement {
        Statement::Insert(tokens) => insert::process_insert(tokens, table),
        Statement::Select => select::process_select(table),
    }
}
