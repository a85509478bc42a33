mod common;
mod create;
mod drop;
mod tokenizer;

use tracing::trace;

use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::parser::command::DdlStatement;

use create::parse_create;
use drop::parse_drop;
use tokenizer::{Token, tokenize};

/// Parses exactly one DDL statement. A single trailing `;` is accepted.
pub fn parse(input: &str, dialect: Dialect) -> Result<DdlStatement, ParseError> {
    let mut statements = parse_batch(input, dialect)?;
    match statements.len() {
        0 => Err(ParseError::Empty),
        1 => Ok(statements.remove(0)),
        n => Err(ParseError::Syntax(format!(
            "Expected a single statement but found {n}"
        ))),
    }
}

/// Parses a `;`-separated list of DDL statements. Empty statements are
/// skipped.
pub fn parse_batch(input: &str, dialect: Dialect) -> Result<Vec<DdlStatement>, ParseError> {
    let tokens = tokenize(input, dialect)?;
    let statements = tokens
        .split(|t| t.is_symbol(';'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| parse_statement(segment, dialect))
        .collect::<Result<Vec<_>, _>>()?;
    trace!(count = statements.len(), %dialect, "parsed ddl batch");
    Ok(statements)
}

fn parse_statement(tokens: &[Token], dialect: Dialect) -> Result<DdlStatement, ParseError> {
    let Some(first) = tokens.first() else {
        return Err(ParseError::Empty);
    };

    if first.is_keyword("create") {
        parse_create(tokens, dialect)
    } else if first.is_keyword("drop") {
        parse_drop(tokens, dialect)
    } else {
        Err(ParseError::Syntax(format!(
            "Unknown command '{first}'. Use create|drop"
        )))
    }
}
