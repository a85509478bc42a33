use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::parser::command::{DdlStatement, DropIndex, DropTable};

use super::common::{expect_end, is_keyword_at, parse_identifier, parse_if_exists, syntax};
use super::tokenizer::Token;

pub(super) fn parse_drop(tokens: &[Token], dialect: Dialect) -> Result<DdlStatement, ParseError> {
    // drop table|index [if exists] <name>
    let is_table = is_keyword_at(tokens, 1, "table");
    if !is_table && !is_keyword_at(tokens, 1, "index") {
        return Err(syntax("Usage: drop table <table> | drop index <index>"));
    }
    let (if_exists, i) = parse_if_exists(tokens, 2, dialect)?;
    let what = if is_table { "table" } else { "index" };
    let (name, i) = parse_identifier(tokens, i, what)?;
    expect_end(tokens, i)?;

    Ok(if is_table {
        DdlStatement::DropTable(DropTable { name, if_exists })
    } else {
        DdlStatement::DropIndex(DropIndex { name, if_exists })
    })
}
