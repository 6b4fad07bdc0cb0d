use nom::{
    bytes::complete::is_not,
    error::VerboseError,
    IResult,
};

/// A single whitespace-delimited token. Neither `username` nor `email` is quoted in this
/// grammar, so a token is simply "everything up to the next run of whitespace".
pub(super) fn parse_token(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    is_not(" \t")(input)
}
