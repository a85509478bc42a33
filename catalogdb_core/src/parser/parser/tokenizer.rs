use std::fmt;

use crate::dialect::Dialect;
use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token {
    /// Bare word: keyword, identifier or number.
    Word(String),
    /// Quoted identifier, case preserved and never a keyword.
    Quoted { name: String, quote: char },
    Symbol(char),
}

impl Token {
    pub(super) fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    pub(super) fn is_symbol(&self, symbol: char) -> bool {
        matches!(self, Token::Symbol(c) if *c == symbol)
    }

    pub(super) fn identifier(&self) -> Option<&str> {
        match self {
            Token::Word(w) | Token::Quoted { name: w, .. } => Some(w),
            Token::Symbol(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => f.write_str(w),
            Token::Quoted { name, quote } => write!(f, "{quote}{name}{quote}"),
            Token::Symbol(c) => write!(f, "{c}"),
        }
    }
}

fn flush(tokens: &mut Vec<Token>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(Token::Word(std::mem::take(current)));
    }
}

pub(super) fn tokenize(input: &str, dialect: Dialect) -> Result<Vec<Token>, ParseError> {
    let options = dialect.options();
    let quote = options.identifier_quote;
    let doubled = options.doubled_quote_escape;
    let mut tokens: Vec<Token> = Vec::new();
    let mut current = String::new();
    let mut just_closed_quote = false;

    let mut it = input.chars().peekable();

    while let Some(ch) = it.next() {
        match ch {
            c if c == quote => {
                if just_closed_quote || !current.is_empty() {
                    return Err(ParseError::Syntax(format!(
                        "Quote ({quote}) cannot start in the middle of a token. Add whitespace before the quote."
                    )));
                }
                let mut quoted = String::new();
                let mut closed = false;
                while let Some(inner) = it.next() {
                    match inner {
                        c if c == quote => {
                            if doubled && it.peek() == Some(&quote) {
                                it.next();
                                quoted.push(quote);
                            } else {
                                closed = true;
                                break;
                            }
                        }
                        '\\' if !doubled => match it.peek().copied() {
                            Some(next) if next == quote || next == '\\' => {
                                it.next();
                                quoted.push(next);
                            }
                            _ => {
                                return Err(ParseError::Syntax(format!(
                                    "Invalid escape sequence in quoted identifier. Use \\{quote} for a quote or \\\\ for a backslash."
                                )));
                            }
                        },
                        c => quoted.push(c),
                    }
                }
                if !closed {
                    return Err(ParseError::Syntax(format!(
                        "Unclosed quote ({quote}) in input"
                    )));
                }
                if quoted.is_empty() {
                    return Err(ParseError::Syntax(
                        "Quoted identifier cannot be empty".to_string(),
                    ));
                }
                tokens.push(Token::Quoted {
                    name: quoted,
                    quote,
                });
                just_closed_quote = true;
            }

            '-' if it.peek() == Some(&'-') => {
                flush(&mut tokens, &mut current);
                for skipped in it.by_ref() {
                    if skipped == '\n' {
                        break;
                    }
                }
                just_closed_quote = false;
            }

            c if c.is_whitespace() => {
                flush(&mut tokens, &mut current);
                just_closed_quote = false;
            }

            ',' | '(' | ')' | '<' | '>' | '[' | ']' | ';' => {
                flush(&mut tokens, &mut current);
                tokens.push(Token::Symbol(ch));
                just_closed_quote = false;
            }

            c if c.is_alphanumeric() || c == '_' => {
                if just_closed_quote {
                    return Err(ParseError::Syntax(
                        "Characters found immediately after a closing quote. Add whitespace after the quoted identifier."
                            .to_string(),
                    ));
                }
                current.push(c);
            }

            other => {
                return Err(ParseError::Syntax(format!(
                    "Unexpected character '{other}'"
                )));
            }
        }
    }

    flush(&mut tokens, &mut current);
    Ok(tokens)
}
