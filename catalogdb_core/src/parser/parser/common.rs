use crate::dialect::{Dialect, NullOrdering, SortDirection};
use crate::error::ParseError;
use crate::parser::command::{InterleaveDef, KeyPartDef};
use crate::schema::OnDeleteAction;

use super::tokenizer::Token;

pub(super) fn syntax(msg: impl Into<String>) -> ParseError {
    ParseError::Syntax(msg.into())
}

pub(super) fn unsupported(feature: &str, dialect: Dialect) -> ParseError {
    ParseError::Unsupported {
        feature: feature.to_string(),
        dialect,
    }
}

fn describe(tokens: &[Token], i: usize) -> String {
    tokens
        .get(i)
        .map(|t| format!("'{t}'"))
        .unwrap_or_else(|| "end of input".to_string())
}

pub(super) fn is_keyword_at(tokens: &[Token], i: usize, keyword: &str) -> bool {
    tokens.get(i).is_some_and(|t| t.is_keyword(keyword))
}

pub(super) fn is_symbol_at(tokens: &[Token], i: usize, symbol: char) -> bool {
    tokens.get(i).is_some_and(|t| t.is_symbol(symbol))
}

/// Consumes one keyword, returning the next position.
pub(super) fn expect_keyword(tokens: &[Token], i: usize, keyword: &str) -> Result<usize, ParseError> {
    if is_keyword_at(tokens, i, keyword) {
        Ok(i + 1)
    } else {
        Err(syntax(format!(
            "Expected {} but found {}",
            keyword.to_uppercase(),
            describe(tokens, i)
        )))
    }
}

pub(super) fn expect_keywords(
    tokens: &[Token],
    mut i: usize,
    keywords: &[&str],
) -> Result<usize, ParseError> {
    for keyword in keywords {
        i = expect_keyword(tokens, i, keyword)?;
    }
    Ok(i)
}

pub(super) fn expect_symbol(tokens: &[Token], i: usize, symbol: char) -> Result<usize, ParseError> {
    if is_symbol_at(tokens, i, symbol) {
        Ok(i + 1)
    } else {
        Err(syntax(format!(
            "Expected '{symbol}' but found {}",
            describe(tokens, i)
        )))
    }
}

pub(super) fn expect_end(tokens: &[Token], i: usize) -> Result<(), ParseError> {
    if i < tokens.len() {
        return Err(syntax(format!(
            "Unexpected {} after end of statement",
            describe(tokens, i)
        )));
    }
    Ok(())
}

pub(super) fn parse_identifier(
    tokens: &[Token],
    i: usize,
    what: &str,
) -> Result<(String, usize), ParseError> {
    match tokens.get(i).and_then(|t| t.identifier()) {
        Some(name) => Ok((name.to_string(), i + 1)),
        None => Err(syntax(format!(
            "Expected {what} name but found {}",
            describe(tokens, i)
        ))),
    }
}

/// `IF NOT EXISTS`, when present and supported by the dialect.
pub(super) fn parse_if_not_exists(
    tokens: &[Token],
    i: usize,
    dialect: Dialect,
) -> Result<(bool, usize), ParseError> {
    if !is_keyword_at(tokens, i, "if") {
        return Ok((false, i));
    }
    if !dialect.options().supports_if_not_exists {
        return Err(unsupported("IF NOT EXISTS", dialect));
    }
    let next = expect_keywords(tokens, i + 1, &["not", "exists"])?;
    Ok((true, next))
}

pub(super) fn parse_if_exists(
    tokens: &[Token],
    i: usize,
    dialect: Dialect,
) -> Result<(bool, usize), ParseError> {
    if !is_keyword_at(tokens, i, "if") {
        return Ok((false, i));
    }
    if !dialect.options().supports_if_not_exists {
        return Err(unsupported("IF EXISTS", dialect));
    }
    let next = expect_keyword(tokens, i + 1, "exists")?;
    Ok((true, next))
}

/// Parenthesized, non-empty, comma-separated identifier list.
pub(super) fn parse_identifier_list(
    tokens: &[Token],
    start: usize,
    what: &str,
) -> Result<(Vec<String>, usize), ParseError> {
    let mut i = expect_symbol(tokens, start, '(')?;
    let mut names: Vec<String> = Vec::new();
    loop {
        let (name, next) = parse_identifier(tokens, i, what)?;
        names.push(name);
        i = next;
        if is_symbol_at(tokens, i, ',') {
            i += 1;
            continue;
        }
        let end = expect_symbol(tokens, i, ')')?;
        return Ok((names, end));
    }
}

/// Parenthesized key list. May be empty; the caller decides whether the
/// dialect accepts that. `NULLS FIRST|LAST` is only accepted by PostgreSQL.
pub(super) fn parse_key_part_list(
    tokens: &[Token],
    start: usize,
    dialect: Dialect,
) -> Result<(Vec<KeyPartDef>, usize), ParseError> {
    let mut i = expect_symbol(tokens, start, '(')?;
    let mut parts: Vec<KeyPartDef> = Vec::new();
    if is_symbol_at(tokens, i, ')') {
        return Ok((parts, i + 1));
    }
    loop {
        let (column, next) = parse_identifier(tokens, i, "key column")?;
        i = next;
        let mut part = KeyPartDef::new(column);
        if is_keyword_at(tokens, i, "asc") {
            part.direction = Some(SortDirection::Asc);
            i += 1;
        } else if is_keyword_at(tokens, i, "desc") {
            part.direction = Some(SortDirection::Desc);
            i += 1;
        }
        if is_keyword_at(tokens, i, "nulls") {
            if dialect != Dialect::PostgreSql {
                return Err(unsupported("NULLS FIRST/LAST", dialect));
            }
            part.nulls = if is_keyword_at(tokens, i + 1, "first") {
                Some(NullOrdering::NullsFirst)
            } else if is_keyword_at(tokens, i + 1, "last") {
                Some(NullOrdering::NullsLast)
            } else {
                return Err(syntax(format!(
                    "Expected FIRST or LAST after NULLS but found {}",
                    describe(tokens, i + 1)
                )));
            };
            i += 2;
        }
        parts.push(part);
        if is_symbol_at(tokens, i, ',') {
            i += 1;
            continue;
        }
        let end = expect_symbol(tokens, i, ')')?;
        return Ok((parts, end));
    }
}

/// `ON DELETE CASCADE | ON DELETE NO ACTION`, if present.
pub(super) fn parse_on_delete(
    tokens: &[Token],
    i: usize,
) -> Result<(Option<OnDeleteAction>, usize), ParseError> {
    if !is_keyword_at(tokens, i, "on") {
        return Ok((None, i));
    }
    let i = expect_keyword(tokens, i + 1, "delete")?;
    if is_keyword_at(tokens, i, "cascade") {
        return Ok((Some(OnDeleteAction::Cascade), i + 1));
    }
    if is_keyword_at(tokens, i, "no") && is_keyword_at(tokens, i + 1, "action") {
        return Ok((Some(OnDeleteAction::NoAction), i + 2));
    }
    Err(syntax(format!(
        "Unknown ON DELETE action {}. Use cascade|no action",
        describe(tokens, i)
    )))
}

/// `INTERLEAVE IN PARENT <table> [ON DELETE ...]`, starting at INTERLEAVE.
pub(super) fn parse_interleave_in_parent(
    tokens: &[Token],
    i: usize,
) -> Result<(InterleaveDef, usize), ParseError> {
    let i = expect_keywords(tokens, i, &["interleave", "in", "parent"])?;
    let (parent, i) = parse_identifier(tokens, i, "parent table")?;
    let (on_delete, i) = parse_on_delete(tokens, i)?;
    Ok((InterleaveDef { parent, on_delete }, i))
}
