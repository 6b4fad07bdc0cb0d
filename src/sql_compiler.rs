mod common_parsers;
mod insert;
mod select;
mod statement;

pub use insert::InsertTokens;
pub use statement::{ParseError, Statement};

/// Splits `line` into a leading keyword and the remainder, and routes to the matching
/// statement parser. Unknown keywords (including a blank line) are reported against the
/// original, untrimmed line so the error message echoes exactly what the user typed.
pub fn parse_statement(line: &str) -> Result<Statement, ParseError> {
    let trimmed = line.trim_start();
    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest),
        None => (trimmed, ""),
    };

    match keyword {
        "insert" => insert::validate_insert(rest),
        "select" => select::validate_select(rest),
        _ => Err(ParseError::UnrecognizedKeyword(line.to_string())),
    }
}
