use thiserror::Error;

use crate::backend::page::{
    COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_SPACE_FOR_CELLS,
};
use crate::backend::row::ROW_SIZE;
use crate::backend::table::{Table, TableError};

#[derive(Error, Debug)]
pub enum MetacommandError {
    #[error("Unrecognized command '{0}'.")]
    Unrecognized(String),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// What the REPL should do after handling a meta-command.
pub enum MetacommandOutcome {
    Continue,
    Exit,
}

pub fn process_metacommand(
    line: &str,
    table: &mut Table,
) -> Result<MetacommandOutcome, MetacommandError> {
    match line {
        ".exit" => Ok(MetacommandOutcome::Exit),
        ".constants" => {
            print_constants();
            Ok(MetacommandOutcome::Continue)
        }
        ".btree" => {
            println!("Tree:");
            table.print_root_leaf()?;
            Ok(MetacommandOutcome::Continue)
        }
        _ => Err(MetacommandError::Unrecognized(line.to_string())),
    }
}

fn print_constants() {
    println!("ROW_SIZE: {}", ROW_SIZE);
    println!("COMMON_NODE_HEADER_SIZE: {}", COMMON_NODE_HEADER_SIZE);
    println!("LEAF_NODE_HEADER_SIZE: {}", LEAF_NODE_HEADER_SIZE);
    println!("LEAF_NODE_CELL_SIZE: {}", LEAF_NODE_CELL_SIZE);
    println!("LEAF_NODE_SPACE_FOR_CELLS: {}", LEAF_NODE_SPACE_FOR_CELLS);
    println!("LEAF_NODE_MAX_CELLS: {}", LEAF_NODE_MAX_CELLS);
}
