//! Nom-based line parser.
//!
//! Server links never carry IRCv3 tags on ngIRCd, so the grammar is
//! `[:prefix] command [params] [:trailing]`.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    combinator::opt,
    error::ErrorKind,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

/// Parse the prefix (after `:`, up to the first space).
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command: letters, or a three digit numeric.
fn parse_command(input: &str) -> IResult<&str, &str> {
    let (rest, cmd) = take_while1(|c: char| c.is_ascii_alphanumeric())(input)?;

    let letters = cmd.chars().all(|c| c.is_ascii_alphabetic());
    let numeric = cmd.len() == 3 && cmd.chars().all(|c| c.is_ascii_digit());
    if letters || numeric {
        Ok((rest, cmd))
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::AlphaNumeric,
        )))
    }
}

/// Split the parameter section.
///
/// Returns the parameters and whether the last one used the `:` form.
/// Runs of spaces count as a single separator.
fn parse_params(input: &str) -> (SmallVec<[&str; 15]>, bool) {
    let mut params: SmallVec<[&str; 15]> = SmallVec::new();
    let mut rest = input;

    while rest.starts_with(' ') {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() || rest.starts_with(['\r', '\n']) {
            break;
        }

        if let Some(after_colon) = rest.strip_prefix(':') {
            let end = after_colon.find(['\r', '\n']).unwrap_or(after_colon.len());
            params.push(&after_colon[..end]);
            return (params, true);
        }

        let end = rest.find([' ', '\r', '\n']).unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    (params, false)
}

/// A line split into borrowed pieces.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedLine<'a> {
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: SmallVec<[&'a str; 15]>,
    pub trailing: bool,
}

fn parse_line(input: &str) -> IResult<&str, ParsedLine<'_>> {
    let (input, _) = space0(input)?;
    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = space0(input)?;
    let (input, command) = parse_command(input)?;
    let (params, trailing) = parse_params(input);

    Ok((
        "",
        ParsedLine {
            prefix,
            command,
            params,
            trailing,
        },
    ))
}

impl<'a> ParsedLine<'a> {
    /// Parse, reporting the byte offset where the grammar stopped matching.
    pub fn parse(input: &'a str) -> Result<Self, usize> {
        match parse_line(input) {
            Ok((_, line)) => Ok(line),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(input.len() - e.input.len()),
            Err(nom::Err::Incomplete(_)) => Err(input.len()),
        }
    }
}
