use thiserror::Error;

use super::insert::InsertTokens;

#[derive(Debug)]
pub enum Statement<'a> {
    Insert(InsertTokens<'a>),
    Select,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Syntax error. Could not parse statement.")]
    Syntax,
    #[error("ID must be positive.")]
    NegativeId,
    #[error("String is too long.")]
    StringTooLong,
    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedKeyword(String),
}
