use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::parser::command::{ColumnDef, CreateIndex, CreateTable, DdlStatement, KeyPartDef};
use crate::types::datatype::{parse_scalar, takes_length, with_length};
use crate::types::{DataType, Length, ScalarType};

use super::common::{
    expect_end, expect_keyword, expect_symbol, is_keyword_at, is_symbol_at, parse_identifier,
    parse_identifier_list, parse_if_not_exists, parse_interleave_in_parent, parse_key_part_list,
    syntax, unsupported,
};
use super::tokenizer::Token;

const CREATE_USAGE: &str = "Usage: create table <table> (...) | create [unique] index <index> on <table> (...)";

pub(super) fn parse_create(tokens: &[Token], dialect: Dialect) -> Result<DdlStatement, ParseError> {
    // tokens[0] is CREATE
    if is_keyword_at(tokens, 1, "table") {
        return parse_create_table(tokens, 2, dialect).map(DdlStatement::CreateTable);
    }

    let mut i = 1usize;
    let mut unique = false;
    let mut null_filtered = false;
    loop {
        if is_keyword_at(tokens, i, "unique") && !unique {
            unique = true;
        } else if is_keyword_at(tokens, i, "null_filtered") && !null_filtered {
            if !dialect.options().supports_null_filtered {
                return Err(unsupported("NULL_FILTERED", dialect));
            }
            null_filtered = true;
        } else {
            break;
        }
        i += 1;
    }
    if !is_keyword_at(tokens, i, "index") {
        return Err(syntax(CREATE_USAGE));
    }
    parse_create_index(tokens, i + 1, unique, null_filtered, dialect).map(DdlStatement::CreateIndex)
}

fn parse_create_table(tokens: &[Token], start: usize, dialect: Dialect) -> Result<CreateTable, ParseError> {
    let (if_not_exists, i) = parse_if_not_exists(tokens, start, dialect)?;
    let (name, i) = parse_identifier(tokens, i, "table")?;
    let mut i = expect_symbol(tokens, i, '(')?;

    let mut columns: Vec<ColumnDef> = Vec::new();
    let mut inline_key: Vec<KeyPartDef> = Vec::new();
    let mut table_key: Option<Vec<KeyPartDef>> = None;

    while !is_symbol_at(tokens, i, ')') {
        if dialect == Dialect::PostgreSql && is_keyword_at(tokens, i, "primary") {
            if table_key.is_some() {
                return Err(syntax(format!("Multiple primary keys for table {name}")));
            }
            let next = expect_keyword(tokens, i + 1, "key")?;
            let (keys, next) = parse_identifier_list(tokens, next, "primary key column")?;
            table_key = Some(keys.into_iter().map(KeyPartDef::new).collect());
            i = next;
        } else {
            let (column, is_key, next) = parse_column_def(tokens, i, dialect)?;
            if is_key {
                inline_key.push(KeyPartDef::new(column.name.clone()));
            }
            columns.push(column);
            i = next;
        }

        if is_symbol_at(tokens, i, ',') {
            i += 1;
            // GoogleSQL tolerates a trailing comma before the closing paren.
            if dialect == Dialect::PostgreSql && is_symbol_at(tokens, i, ')') {
                return Err(syntax("Bad CREATE column list. Trailing comma is not allowed."));
            }
        } else if !is_symbol_at(tokens, i, ')') {
            return Err(syntax("Bad CREATE column list. Columns must be comma-separated."));
        }
    }
    i += 1;

    let primary_key = match dialect {
        Dialect::GoogleSql => {
            let next = expect_keyword(tokens, i, "primary")?;
            let next = expect_keyword(tokens, next, "key")?;
            let (keys, next) = parse_key_part_list(tokens, next, dialect)?;
            i = next;
            keys
        }
        Dialect::PostgreSql => match (table_key, inline_key.is_empty()) {
            (Some(keys), true) => keys,
            (None, false) if inline_key.len() == 1 => inline_key,
            (None, true) => {
                return Err(syntax(format!("Table {name} does not have a PRIMARY KEY")));
            }
            _ => return Err(syntax(format!("Multiple primary keys for table {name}"))),
        },
    };

    if is_symbol_at(tokens, i, ',') && is_keyword_at(tokens, i + 1, "interleave") {
        i += 1;
    }
    let mut interleave = None;
    if is_keyword_at(tokens, i, "interleave") {
        let (def, next) = parse_interleave_in_parent(tokens, i)?;
        interleave = Some(def);
        i = next;
    }
    expect_end(tokens, i)?;

    Ok(CreateTable {
        name,
        columns,
        primary_key,
        interleave,
        if_not_exists,
    })
}

/// One column definition. The flag reports an inline PRIMARY KEY.
fn parse_column_def(
    tokens: &[Token],
    start: usize,
    dialect: Dialect,
) -> Result<(ColumnDef, bool, usize), ParseError> {
    let (name, i) = parse_identifier(tokens, start, "column")?;
    let (data_type, mut i) = parse_data_type(tokens, i, dialect)?;
    let mut not_null = false;
    let mut primary_key = false;

    while i < tokens.len() && !is_symbol_at(tokens, i, ',') && !is_symbol_at(tokens, i, ')') {
        if is_keyword_at(tokens, i, "not") {
            i = expect_keyword(tokens, i + 1, "null")?;
            not_null = true;
        } else if dialect == Dialect::PostgreSql && is_keyword_at(tokens, i, "null") {
            i += 1;
        } else if dialect == Dialect::PostgreSql && is_keyword_at(tokens, i, "primary") {
            i = expect_keyword(tokens, i + 1, "key")?;
            primary_key = true;
        } else {
            return Err(syntax(format!(
                "Unknown column constraint '{}' on column {name}",
                tokens[i]
            )));
        }
    }

    Ok((
        ColumnDef {
            name,
            data_type,
            not_null,
        },
        primary_key,
        i,
    ))
}

fn parse_length(tokens: &[Token], start: usize, dialect: Dialect) -> Result<(Length, usize), ParseError> {
    let i = expect_symbol(tokens, start, '(')?;
    let length = match tokens.get(i) {
        Some(Token::Word(w)) if dialect == Dialect::GoogleSql && w.eq_ignore_ascii_case("max") => Length::Max,
        Some(Token::Word(w)) => match w.parse::<u64>() {
            Ok(n) if n > 0 => Length::Limit(n),
            _ => return Err(syntax(format!("Bad type length '{w}'"))),
        },
        _ => return Err(syntax("Missing type length")),
    };
    let i = expect_symbol(tokens, i + 1, ')')?;
    Ok((length, i))
}

fn parse_scalar_type(
    tokens: &[Token],
    start: usize,
    dialect: Dialect,
) -> Result<(ScalarType, usize), ParseError> {
    let word = match tokens.get(start) {
        Some(Token::Word(w)) => w.as_str(),
        Some(other) => return Err(ParseError::UnknownType(other.to_string())),
        None => return Err(syntax("Missing datatype in column definition")),
    };
    let mut i = start + 1;

    let scalar = match dialect {
        Dialect::PostgreSql if word.eq_ignore_ascii_case("double") => {
            i = expect_keyword(tokens, i, "precision")?;
            ScalarType::Float64
        }
        Dialect::PostgreSql if word.eq_ignore_ascii_case("character") => {
            i = expect_keyword(tokens, i, "varying")?;
            ScalarType::String(Length::Max)
        }
        Dialect::PostgreSql if word.eq_ignore_ascii_case("timestamp") => {
            i = expect_keyword(tokens, i, "with")?;
            i = expect_keyword(tokens, i, "time")?;
            i = expect_keyword(tokens, i, "zone")?;
            ScalarType::Timestamp
        }
        _ => parse_scalar(dialect, word).ok_or_else(|| ParseError::UnknownType(word.to_string()))?,
    };

    if !takes_length(&scalar) {
        return Ok((scalar, i));
    }
    match dialect {
        Dialect::GoogleSql => {
            if !is_symbol_at(tokens, i, '(') {
                return Err(syntax(format!(
                    "{} requires a length. Use {}(n) or {}(MAX)",
                    scalar.type_name(),
                    scalar.type_name(),
                    scalar.type_name()
                )));
            }
            let (length, next) = parse_length(tokens, i, dialect)?;
            Ok((with_length(scalar, length), next))
        }
        Dialect::PostgreSql => {
            if matches!(scalar, ScalarType::String(_)) && is_symbol_at(tokens, i, '(') {
                let (length, next) = parse_length(tokens, i, dialect)?;
                return Ok((with_length(scalar, length), next));
            }
            Ok((scalar, i))
        }
    }
}

pub(super) fn parse_data_type(
    tokens: &[Token],
    start: usize,
    dialect: Dialect,
) -> Result<(DataType, usize), ParseError> {
    match dialect {
        Dialect::GoogleSql if is_keyword_at(tokens, start, "array") => {
            let i = expect_symbol(tokens, start + 1, '<')?;
            if is_keyword_at(tokens, i, "array") {
                return Err(syntax("Arrays of arrays are not supported"));
            }
            let (scalar, i) = parse_scalar_type(tokens, i, dialect)?;
            let i = expect_symbol(tokens, i, '>')?;
            Ok((DataType::Array(scalar), i))
        }
        Dialect::GoogleSql => {
            let (scalar, i) = parse_scalar_type(tokens, start, dialect)?;
            Ok((DataType::Scalar(scalar), i))
        }
        Dialect::PostgreSql => {
            let (scalar, i) = parse_scalar_type(tokens, start, dialect)?;
            if !is_symbol_at(tokens, i, '[') {
                return Ok((DataType::Scalar(scalar), i));
            }
            let i = expect_symbol(tokens, i + 1, ']')?;
            if is_symbol_at(tokens, i, '[') {
                return Err(syntax("Arrays of arrays are not supported"));
            }
            Ok((DataType::Array(scalar), i))
        }
    }
}

fn parse_create_index(
    tokens: &[Token],
    start: usize,
    unique: bool,
    null_filtered: bool,
    dialect: Dialect,
) -> Result<CreateIndex, ParseError> {
    let (if_not_exists, i) = parse_if_not_exists(tokens, start, dialect)?;
    let (name, i) = parse_identifier(tokens, i, "index")?;
    let i = expect_keyword(tokens, i, "on")?;
    let (table, i) = parse_identifier(tokens, i, "table")?;
    let (key_parts, mut i) = parse_key_part_list(tokens, i, dialect)?;
    if key_parts.is_empty() && !dialect.options().allows_empty_index_keys {
        return Err(unsupported("Index without key columns", dialect));
    }

    let storing_keyword = match dialect {
        Dialect::GoogleSql => "storing",
        Dialect::PostgreSql => "include",
    };
    let mut stored_columns = Vec::new();
    if is_keyword_at(tokens, i, storing_keyword) {
        let (columns, next) = parse_identifier_list(tokens, i + 1, "stored column")?;
        stored_columns = columns;
        i = next;
    }

    if is_symbol_at(tokens, i, ',') && is_keyword_at(tokens, i + 1, "interleave") {
        i += 1;
    }
    let mut interleave_in = None;
    if is_keyword_at(tokens, i, "interleave") {
        let next = expect_keyword(tokens, i + 1, "in")?;
        let (parent, next) = parse_identifier(tokens, next, "parent table")?;
        interleave_in = Some(parent);
        i = next;
    }
    expect_end(tokens, i)?;

    Ok(CreateIndex {
        name,
        table,
        key_parts,
        stored_columns,
        unique,
        null_filtered,
        interleave_in,
        if_not_exists,
    })
}
