//! Lexical analysis for the document text format.
//!
//! This module provides the [`Lexer`], which classifies raw text into the
//! typed tokens the deserializer consumes:
//!
//! - **Symbols**: punctuation characters (`{`, `}`, `(`, `)`, `[`, `]`, `,`,
//!   `=`) and bare identifier text
//! - **Literals**: double-quoted strings, numbers, `True`/`False`, `None`
//! - **Comments**: `#` to end of line
//! - **Newlines** and **end-of-stream**
//!
//! Every token records the 1-based line and column where it starts, which is
//! what [`Error::CorruptText`](crate::Error::CorruptText) reports on
//! malformed input.
//!
//! The deserializer is written against the [`TokenStream`] trait rather than
//! the concrete lexer, so any token source with one-token pushback can drive
//! it.
//!
//! ## Examples
//!
//! ```rust
//! use anydoc::lexer::{Lexer, TokenKind, TokenStream};
//!
//! let mut lexer = Lexer::new("{ x = 1 }");
//! assert_eq!(lexer.next_token()?.kind, TokenKind::Symbol("{".to_string()));
//! assert_eq!(lexer.next_token()?.kind, TokenKind::Symbol("x".to_string()));
//! assert_eq!(lexer.next_token()?.kind, TokenKind::Symbol("=".to_string()));
//! assert_eq!(lexer.next_token()?.kind, TokenKind::Number(1.0));
//! # Ok::<(), anydoc::Error>(())
//! ```

use crate::{Error, Result};

/// The classification of a lexical token.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// A punctuation character or bare identifier text.
    Symbol(String),
    /// A double-quoted, backslash-escaped string literal (unescaped).
    Str(String),
    /// A numeric literal.
    Number(f64),
    /// `True` or `False`.
    Boolean(bool),
    /// The `None` literal.
    None,
    /// A `#` comment; carries the text between `#` and the end of line.
    Comment(String),
    /// A line break.
    Newline,
    /// End of the token stream.
    End,
}

impl TokenKind {
    /// Short human-readable description used in parse error messages.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Str(_) => "string",
            TokenKind::Number(_) => "number",
            TokenKind::Boolean(_) => "boolean",
            TokenKind::None => "None",
            TokenKind::Comment(_) => "comment",
            TokenKind::Newline => "newline",
            TokenKind::End => "end of input",
        }
    }
}

/// A classified lexical token with its source position.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line where the token starts.
    pub line: usize,
    /// 1-based column where the token starts.
    pub column: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Token { kind, line, column }
    }
}

/// A cursor over a token sequence with one-token pushback.
///
/// [`deserialize`](crate::de::deserialize) consumes any implementation of
/// this trait. Pushback is required because the array-element and
/// named-container rules read one token too far before recursing.
pub trait TokenStream {
    /// Returns the next token. After the input is exhausted, returns
    /// [`TokenKind::End`] tokens indefinitely.
    fn next_token(&mut self) -> Result<Token>;

    /// Pushes a token back onto the stream; the next call to
    /// [`next_token`](TokenStream::next_token) returns it. Only one token of
    /// pushback is supported.
    fn push_back(&mut self, token: Token);

    /// Returns the next token without consuming it.
    fn peek_token(&mut self) -> Result<Token> {
        let token = self.next_token()?;
        self.push_back(token.clone());
        Ok(token)
    }
}

/// The text-format lexer.
///
/// Recognizes `#` line comments and, by default, matches the `True` / `False`
/// / `None` keywords case-insensitively (so `true` also parses as a boolean).
/// The canonical serializer only ever emits the capitalized forms.
pub struct Lexer<'src> {
    input: &'src str,
    position: usize,
    line: usize,
    column: usize,
    pushback: Option<Token>,
    case_sensitive_keywords: bool,
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(input: &'src str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            pushback: None,
            case_sensitive_keywords: false,
        }
    }

    /// Requires exact `True` / `False` / `None` capitalization; other
    /// spellings lex as bare identifiers.
    #[must_use]
    pub fn with_case_sensitive_keywords(mut self) -> Self {
        self.case_sensitive_keywords = true;
        self
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.position..].chars().next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_blank(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() && ch != '\n' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn lex_comment(&mut self, line: usize, column: usize) -> Token {
        self.next_char(); // consume '#'
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            self.next_char();
        }
        let text = self.input[start..self.position].to_string();
        Token::new(TokenKind::Comment(text), line, column)
    }

    fn lex_string(&mut self, line: usize, column: usize) -> Result<Token> {
        self.next_char(); // consume opening quote
        let mut result = String::new();

        while let Some(ch) = self.next_char() {
            match ch {
                '"' => return Ok(Token::new(TokenKind::Str(result), line, column)),
                '\\' => match self.next_char() {
                    Some('\\') => result.push('\\'),
                    Some('"') => result.push('"'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('0') => result.push('\0'),
                    Some('u') => {
                        let mut hex = String::new();
                        for _ in 0..4 {
                            match self.next_char() {
                                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                                _ => {
                                    return Err(Error::corrupt_text(
                                        Token::new(TokenKind::Str(result), line, column),
                                        "invalid unicode escape (expected 4 hex digits)",
                                    ))
                                }
                            }
                        }
                        let code_point = u32::from_str_radix(&hex, 16).expect("checked hex digits");
                        match char::from_u32(code_point) {
                            Some(ch) => result.push(ch),
                            None => {
                                return Err(Error::corrupt_text(
                                    Token::new(TokenKind::Str(result), line, column),
                                    "invalid unicode code point",
                                ))
                            }
                        }
                    }
                    // Unknown escape is preserved literally
                    Some(other) => {
                        result.push('\\');
                        result.push(other);
                    }
                    None => {
                        return Err(Error::corrupt_text(
                            Token::new(TokenKind::Str(result), line, column),
                            "unexpected end of input in string",
                        ))
                    }
                },
                other => result.push(other),
            }
        }

        Err(Error::corrupt_text(
            Token::new(TokenKind::Str(result), line, column),
            "unterminated string literal",
        ))
    }

    fn lex_number(&mut self, line: usize, column: usize) -> Result<Token> {
        let start = self.position;

        if matches!(self.peek_char(), Some('-' | '+')) {
            self.next_char();
        }
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
            self.next_char();
        }
        if self.peek_char() == Some('.') {
            self.next_char();
            while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                self.next_char();
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.next_char();
            if matches!(self.peek_char(), Some('-' | '+')) {
                self.next_char();
            }
            while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                self.next_char();
            }
        }

        let text = &self.input[start..self.position];
        match text.parse::<f64>() {
            Ok(number) => Ok(Token::new(TokenKind::Number(number), line, column)),
            Err(_) => Err(Error::corrupt_text(
                Token::new(TokenKind::Symbol(text.to_string()), line, column),
                "invalid numeric literal",
            )),
        }
    }

    fn lex_identifier(&mut self, line: usize, column: usize) -> Token {
        let start = self.position;
        while matches!(self.peek_char(), Some(ch) if ch.is_alphanumeric() || ch == '_') {
            self.next_char();
        }
        let text = &self.input[start..self.position];

        let keyword = |word: &str| {
            if self.case_sensitive_keywords {
                text == word
            } else {
                text.eq_ignore_ascii_case(word)
            }
        };

        let kind = if keyword("True") {
            TokenKind::Boolean(true)
        } else if keyword("False") {
            TokenKind::Boolean(false)
        } else if keyword("None") {
            TokenKind::None
        } else {
            TokenKind::Symbol(text.to_string())
        };
        Token::new(kind, line, column)
    }
}

impl TokenStream for Lexer<'_> {
    fn next_token(&mut self) -> Result<Token> {
        if let Some(token) = self.pushback.take() {
            return Ok(token);
        }

        self.skip_blank();
        let (line, column) = (self.line, self.column);

        let Some(ch) = self.peek_char() else {
            return Ok(Token::new(TokenKind::End, line, column));
        };

        match ch {
            '\n' => {
                self.next_char();
                Ok(Token::new(TokenKind::Newline, line, column))
            }
            '#' => Ok(self.lex_comment(line, column)),
            '"' => self.lex_string(line, column),
            '0'..='9' => self.lex_number(line, column),
            '-' | '+' | '.' => {
                let followed_by_digit = self.input[self.position..]
                    .chars()
                    .nth(1)
                    .is_some_and(|next| next.is_ascii_digit() || (ch != '.' && next == '.'));
                if followed_by_digit {
                    self.lex_number(line, column)
                } else {
                    self.next_char();
                    Ok(Token::new(
                        TokenKind::Symbol(ch.to_string()),
                        line,
                        column,
                    ))
                }
            }
            ch if ch.is_alphabetic() || ch == '_' => Ok(self.lex_identifier(line, column)),
            other => {
                self.next_char();
                Ok(Token::new(
                    TokenKind::Symbol(other.to_string()),
                    line,
                    column,
                ))
            }
        }
    }

    fn push_back(&mut self, token: Token) {
        debug_assert!(self.pushback.is_none(), "only one token of pushback");
        self.pushback = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            let done = token.kind == TokenKind::End;
            out.push(token.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn test_symbols_and_literals() {
        assert_eq!(
            kinds("{ x = 1.5 }"),
            vec![
                TokenKind::Symbol("{".to_string()),
                TokenKind::Symbol("x".to_string()),
                TokenKind::Symbol("=".to_string()),
                TokenKind::Number(1.5),
                TokenKind::Symbol("}".to_string()),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            kinds("True false NONE"),
            vec![
                TokenKind::Boolean(true),
                TokenKind::Boolean(false),
                TokenKind::None,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_keywords_case_sensitive() {
        let mut lexer = Lexer::new("true").with_case_sensitive_keywords();
        assert_eq!(
            lexer.next_token().unwrap().kind,
            TokenKind::Symbol("true".to_string())
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("# note\n3"),
            vec![
                TokenKind::Comment(" note".to_string()),
                TokenKind::Newline,
                TokenKind::Number(3.0),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\n\"b\"A""#),
            vec![TokenKind::Str("a\n\"b\"A".to_string()), TokenKind::End]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("\"open");
        let err = lexer.next_token().unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_negative_and_exponent_numbers() {
        assert_eq!(
            kinds("-2.5 1e3 +4"),
            vec![
                TokenKind::Number(-2.5),
                TokenKind::Number(1000.0),
                TokenKind::Number(4.0),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let mut lexer = Lexer::new("a\n  b");
        let a = lexer.next_token().unwrap();
        assert_eq!((a.line, a.column), (1, 1));
        let newline = lexer.next_token().unwrap();
        assert_eq!(newline.kind, TokenKind::Newline);
        let b = lexer.next_token().unwrap();
        assert_eq!((b.line, b.column), (2, 3));
    }

    #[test]
    fn test_pushback() {
        let mut lexer = Lexer::new("1 2");
        let one = lexer.next_token().unwrap();
        lexer.push_back(one.clone());
        assert_eq!(lexer.next_token().unwrap(), one);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Number(2.0));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("7");
        assert_eq!(lexer.peek_token().unwrap().kind, TokenKind::Number(7.0));
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Number(7.0));
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::End);
    }
}
