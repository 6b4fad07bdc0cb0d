use std::env;
use std::error::Error;
use std::io::{self, Write};

use tracing_subscriber::EnvFilter;

mod backend;
mod metacommand_processor;
mod sql_compiler;
mod virtual_machine;

use backend::table::Table;
use metacommand_processor::{process_metacommand, MetacommandOutcome};
use sql_compiler::parse_statement;

/// Processes one REPL line. Returns `Ok(true)` to keep looping, `Ok(false)` once `.exit` has
/// closed the table and the process should end successfully.
fn process_input(input: &str, table: &mut Table) -> Result<bool, Box<dyn Error>> {
    if input.starts_with('.') {
        match process_metacommand(input, table) {
            Ok(MetacommandOutcome::Continue) => return Ok(true),
            Ok(MetacommandOutcome::Exit) => return Ok(false),
            Err(err) => {
                println!("{}", err);
                return Ok(true);
            }
        }
    }

    match parse_statement(input) {
        Ok(statement) => match virtual_machine::execute_statement(statement, table) {
            Ok(()) => println!("Executed."),
            Err(err) => match err.as_recoverable() {
                Some(recoverable) => println!("{}", recoverable),
                None => return Err(Box::new(err)),
            },
        },
        Err(err) => println!("{}", err),
    }

    Ok(true)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LEAFDB_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let Some(db_path) = args.get(1) else {
        eprintln!("Must supply a database filename.");
        std::process::exit(1);
    };

    let mut table = Table::open(db_path)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("db > ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match process_input(line, &mut table) {
            Ok(true) => continue,
            Ok(false) => {
                table.close()?;
                break;
            }
            Err(err) => {
                eprintln!("{}", err);
                return Err(err);
            }
        }
    }

    Ok(())
}
