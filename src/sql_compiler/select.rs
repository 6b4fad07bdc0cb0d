use nom::{character::complete::multispace0, combinator::all_consuming, Finish};

use super::statement::{ParseError, Statement};

pub(super) fn validate_select(input: &str) -> Result<Statement, ParseError> {
    all_consuming(multispace0::<_, nom::error::VerboseError<&str>>)(input)
        .finish()
        .map_err(|_| ParseError::Syntax)?;
    Ok(Statement::Select)
}
