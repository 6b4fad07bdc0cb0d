use nom::{
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, preceded, tuple},
    Finish, IResult,
};

use super::common_parsers::parse_token;
use super::statement::{ParseError, Statement};
use crate::backend::row::{EMAIL_SIZE, USERNAME_SIZE};

#[derive(Debug)]
pub struct InsertTokens<'a> {
    pub id: u32,
    pub username: &'a str,
    pub email: &'a str,
}

fn parse_fields(
    input: &str,
) -> IResult<&str, (&str, &str, &str), nom::error::VerboseError<&str>> {
    tuple((
        preceded(multispace0, recognize(pair(opt(char('-')), digit1))),
        preceded(multispace1, parse_token),
        preceded(multispace1, parse_token),
    ))(input)
}

pub(super) fn validate_insert(input: &str) -> Result<Statement, ParseError> {
    let (_, ((id_str, username, email), _)) = all_consuming(pair(parse_fields, multispace0))(input)
        .finish()
        .map_err(|_: nom::error::VerboseError<&str>| ParseError::Syntax)?;

    let id: i64 = id_str.parse().map_err(|_| ParseError::Syntax)?;
    if id < 0 {
        return Err(ParseError::NegativeId);
    }
    if username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE {
        return Err(ParseError::StringTooLong);
    }

    Ok(Statement::Insert(InsertTokens {
        id: id as u32,
        username,
        email,
    }))
}
