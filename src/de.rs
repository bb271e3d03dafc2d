//! Text-format deserialization.
//!
//! This module provides [`deserialize`], the recursive-descent parser that
//! builds an [`Any`] tree from a [`TokenStream`]. One call consumes exactly
//! one logical value and leaves the cursor positioned just past it; newline
//! tokens are pure whitespace and are skipped wherever a value or element is
//! expected.
//!
//! A `#` comment token attaches to the value that follows it: the comment
//! text is prepended to that value's existing comment, so stacked comment
//! lines compose front-to-back. Inside a table body a comment may precede the
//! `key = value` pair; it attaches to that pair's value.
//!
//! Malformed input fails with [`Error::CorruptText`], carrying the offending
//! token and a diagnostic message. That is the only error this module raises.
//!
//! ## Usage
//!
//! Most users should use [`from_str`](crate::from_str) or
//! [`load`](crate::load); `deserialize` is the primitive those wrappers and
//! other collaborators build on:
//!
//! ```rust
//! use anydoc::de::deserialize;
//! use anydoc::lexer::Lexer;
//!
//! let mut lexer = Lexer::new("Foo(1, 2, 3)");
//! let value = deserialize(&mut lexer)?;
//! assert_eq!(value.name(), Some("Foo"));
//! assert_eq!(value.len()?, 3);
//! # Ok::<(), anydoc::Error>(())
//! ```

use crate::lexer::{Token, TokenKind, TokenStream};
use crate::{Any, Error, Result};

/// Deserializes one value from the token stream.
///
/// Skips leading newlines, then consumes exactly one value: a literal, a
/// `{`-table, a `(`/`[`-array, or a named container. Comment tokens are
/// folded into the following value's comment.
///
/// # Errors
///
/// Fails with [`Error::CorruptText`] on malformed input.
pub fn deserialize<S: TokenStream>(stream: &mut S) -> Result<Any> {
    loop {
        let token = stream.next_token()?;
        let (line, column) = (token.line, token.column);
        match token.kind {
            TokenKind::Newline => continue,
            TokenKind::Comment(text) => {
                let mut value = deserialize(stream)?;
                value.prepend_comment(&text);
                return Ok(value);
            }
            TokenKind::None => return Ok(Any::default()),
            TokenKind::Boolean(value) => return Ok(Any::from(value)),
            TokenKind::Number(value) => return Ok(Any::from(value)),
            TokenKind::Str(value) => return Ok(Any::from(value)),
            TokenKind::Symbol(symbol) => match symbol.as_str() {
                "{" => return parse_table(stream),
                "(" | "[" => return parse_array(stream),
                _ if is_identifier(&symbol) => {
                    let mut value = deserialize(stream)?;
                    if !value.is_array() && !value.is_table() {
                        return Err(Error::corrupt_text(
                            Token::new(TokenKind::Symbol(symbol), line, column),
                            "name must be followed by an array or table",
                        ));
                    }
                    value.set_name(symbol)?;
                    return Ok(value);
                }
                _ => {
                    return Err(Error::corrupt_text(
                        Token::new(TokenKind::Symbol(symbol), line, column),
                        "unexpected token",
                    ))
                }
            },
            TokenKind::End => {
                return Err(Error::corrupt_text(token, "unexpected end of input"))
            }
        }
    }
}

/// Deserializes a whole document.
///
/// A document is either a single value or, in the common configuration-file
/// shape, a brace-less sequence of `key = value` pairs, which parses as a
/// table. The pair form is recognized by a bare identifier followed by `=`.
/// Trailing newlines and comments after the value are ignored; any other
/// trailing token fails [`Error::CorruptText`].
pub fn deserialize_document<S: TokenStream>(stream: &mut S) -> Result<Any> {
    let mut pending_comment: Option<String> = None;
    loop {
        let token = stream.next_token()?;
        match token.kind {
            TokenKind::Newline => continue,
            TokenKind::Comment(text) => {
                push_comment(&mut pending_comment, &text);
            }
            TokenKind::End => return Ok(Any::default()),
            TokenKind::Symbol(symbol) if is_identifier(&symbol) => {
                let (line, column) = (token.line, token.column);
                // One token of lookahead decides between `key = value` pairs
                // and a single named container.
                let next = stream.next_token()?;
                if next.kind == TokenKind::Symbol("=".to_string()) {
                    let mut table = Any::table();
                    let mut value = deserialize(stream)?;
                    if let Some(text) = pending_comment.take() {
                        value.prepend_comment(&text);
                    }
                    table.insert(symbol, value)?;
                    parse_pairs(stream, &mut table, Terminator::EndOfStream)?;
                    return Ok(table);
                }
                // Single named container; the cursor only guarantees one
                // token of pushback, so the name rule is applied here.
                stream.push_back(next);
                let mut value = deserialize(stream)?;
                if !value.is_array() && !value.is_table() {
                    return Err(Error::corrupt_text(
                        Token::new(TokenKind::Symbol(symbol), line, column),
                        "name must be followed by an array or table",
                    ));
                }
                value.set_name(symbol)?;
                if let Some(text) = pending_comment.take() {
                    value.prepend_comment(&text);
                }
                expect_trailing(stream)?;
                return Ok(value);
            }
            _ => {
                stream.push_back(token);
                let mut value = deserialize(stream)?;
                if let Some(text) = pending_comment.take() {
                    value.prepend_comment(&text);
                }
                expect_trailing(stream)?;
                return Ok(value);
            }
        }
    }
}

#[derive(PartialEq)]
enum Terminator {
    CloseBrace,
    EndOfStream,
}

fn parse_table<S: TokenStream>(stream: &mut S) -> Result<Any> {
    let mut table = Any::table();
    parse_pairs(stream, &mut table, Terminator::CloseBrace)?;
    Ok(table)
}

fn parse_pairs<S: TokenStream>(
    stream: &mut S,
    table: &mut Any,
    terminator: Terminator,
) -> Result<()> {
    let mut pending_comment: Option<String> = None;
    loop {
        let token = stream.next_token()?;
        let (line, column) = (token.line, token.column);
        match token.kind {
            TokenKind::Newline => {}
            TokenKind::Comment(text) => push_comment(&mut pending_comment, &text),
            TokenKind::Symbol(symbol) => match symbol.as_str() {
                "," => {}
                "}" if terminator == Terminator::CloseBrace => return Ok(()),
                _ if is_identifier(&symbol) => {
                    expect_equals(stream)?;
                    let mut value = deserialize(stream)?;
                    if let Some(text) = pending_comment.take() {
                        value.prepend_comment(&text);
                    }
                    table.insert(symbol, value)?;
                }
                _ => {
                    return Err(Error::corrupt_text(
                        Token::new(TokenKind::Symbol(symbol), line, column),
                        "expected a table key",
                    ))
                }
            },
            TokenKind::End if terminator == Terminator::EndOfStream => return Ok(()),
            TokenKind::End => {
                return Err(Error::corrupt_text(token, "table ended unexpectedly"))
            }
            _ => return Err(Error::corrupt_text(token, "expected a table key")),
        }
    }
}

fn parse_array<S: TokenStream>(stream: &mut S) -> Result<Any> {
    let mut array = Any::array();
    loop {
        let token = stream.next_token()?;
        match &token.kind {
            TokenKind::Newline => {}
            TokenKind::Symbol(symbol) if symbol == "," => {}
            TokenKind::Symbol(symbol) if symbol == ")" || symbol == "]" => return Ok(array),
            TokenKind::End => {
                return Err(Error::corrupt_text(token, "array ended unexpectedly"))
            }
            _ => {
                stream.push_back(token);
                let element = deserialize(stream)?;
                array.push(element)?;
            }
        }
    }
}

fn expect_equals<S: TokenStream>(stream: &mut S) -> Result<()> {
    loop {
        let token = stream.next_token()?;
        match &token.kind {
            TokenKind::Newline => {}
            TokenKind::Symbol(symbol) if symbol == "=" => return Ok(()),
            _ => {
                return Err(Error::corrupt_text(token, "expected '=' after table key"))
            }
        }
    }
}

fn expect_trailing<S: TokenStream>(stream: &mut S) -> Result<()> {
    loop {
        let token = stream.next_token()?;
        match token.kind {
            TokenKind::Newline | TokenKind::Comment(_) => {}
            TokenKind::End => return Ok(()),
            _ => {
                return Err(Error::corrupt_text(
                    token,
                    "unexpected content after document value",
                ))
            }
        }
    }
}

fn push_comment(pending: &mut Option<String>, text: &str) {
    *pending = Some(match pending.take() {
        Some(existing) => format!("{existing}\n{text}"),
        None => text.to_string(),
    });
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|ch| ch.is_alphabetic() || ch == '_')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(input: &str) -> Result<Any> {
        deserialize(&mut Lexer::new(input))
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse("42").unwrap(), Any::from(42.0));
        assert_eq!(parse("True").unwrap(), Any::from(true));
        assert_eq!(parse("\"hi\"").unwrap(), Any::from("hi"));
        assert!(parse("None").unwrap().is_none());
    }

    #[test]
    fn test_array() {
        let value = parse("(1, 2, 3)").unwrap();
        assert_eq!(value.len().unwrap(), 3);
        assert_eq!(value.at(2).unwrap().number().unwrap(), 3.0);
    }

    #[test]
    fn test_bracket_synonym() {
        assert_eq!(parse("[1, 2]").unwrap(), parse("(1, 2)").unwrap());
    }

    #[test]
    fn test_nested_arrays() {
        let value = parse("((1, 2), (3))").unwrap();
        assert_eq!(value.len().unwrap(), 2);
        assert_eq!(value.at(0).unwrap().len().unwrap(), 2);
        assert_eq!(value.at(1).unwrap().at(0).unwrap().number().unwrap(), 3.0);
    }

    #[test]
    fn test_table() {
        let value = parse("{ a = 1, b = \"two\" }").unwrap();
        assert_eq!(value.get("a").unwrap().number().unwrap(), 1.0);
        assert_eq!(value.get("b").unwrap().string().unwrap(), "two");
    }

    #[test]
    fn test_table_newline_separated() {
        let value = parse("{\n  a = 1\n  b = 2\n}").unwrap();
        assert_eq!(value.len().unwrap(), 2);
    }

    #[test]
    fn test_named_containers() {
        let array = parse("Foo(1, 2, 3)").unwrap();
        assert_eq!(array.name(), Some("Foo"));
        assert_eq!(array.len().unwrap(), 3);

        let table = parse("Config{ size = 8 }").unwrap();
        assert_eq!(table.name(), Some("Config"));
        assert_eq!(table.get("size").unwrap().number().unwrap(), 8.0);
    }

    #[test]
    fn test_name_requires_container() {
        let err = parse("Foo 3").unwrap_err();
        assert!(err.to_string().contains("array or table"));
    }

    #[test]
    fn test_comment_attaches_to_value() {
        let value = parse("# note\n3").unwrap();
        assert_eq!(value.number().unwrap(), 3.0);
        assert_eq!(value.comment(), Some(" note"));
    }

    #[test]
    fn test_stacked_comments_compose() {
        let value = parse("# first\n# second\n3").unwrap();
        assert_eq!(value.comment(), Some(" first\n second"));
    }

    #[test]
    fn test_comment_before_table_pair() {
        let value = parse("{ # note\nx = 3 }").unwrap();
        assert_eq!(value.get("x").unwrap().comment(), Some(" note"));
    }

    #[test]
    fn test_unterminated_table() {
        let err = parse("{ a = 1 ").unwrap_err();
        assert!(err.to_string().contains("table ended unexpectedly"));
    }

    #[test]
    fn test_unterminated_array() {
        let err = parse("(1, 2").unwrap_err();
        assert!(err.to_string().contains("array ended unexpectedly"));
    }

    #[test]
    fn test_missing_equals() {
        let err = parse("{ a 1 }").unwrap_err();
        assert!(err.to_string().contains("expected '='"));
    }

    #[test]
    fn test_duplicate_key_replaces() {
        let value = parse("{ a = 1, a = 2 }").unwrap();
        assert_eq!(value.len().unwrap(), 1);
        assert_eq!(value.get("a").unwrap().number().unwrap(), 2.0);
    }

    #[test]
    fn test_document_implicit_table() {
        let mut lexer = Lexer::new("# note\nx = 3\ny = (1, 2)\n");
        let doc = deserialize_document(&mut lexer).unwrap();
        assert!(doc.is_table());
        assert_eq!(doc.get("x").unwrap().comment(), Some(" note"));
        assert_eq!(doc.get("y").unwrap().len().unwrap(), 2);
    }

    #[test]
    fn test_document_single_value() {
        let mut lexer = Lexer::new("Foo(1, 2)\n");
        let doc = deserialize_document(&mut lexer).unwrap();
        assert_eq!(doc.name(), Some("Foo"));
    }

    #[test]
    fn test_document_trailing_garbage() {
        let mut lexer = Lexer::new("(1) 2");
        let err = deserialize_document(&mut lexer).unwrap_err();
        assert!(err.to_string().contains("after document value"));
    }
}
