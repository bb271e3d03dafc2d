//! Error types for document value access and text parsing.
//!
//! All failures in this crate are local, typed, recoverable conditions:
//!
//! - **Type mismatches**: an accessor required one value kind, the value holds another
//! - **Missing keys**: read-only lookup of an absent table key
//! - **Index errors**: array access outside `[0, len)`
//! - **Corrupt text**: malformed input, reported with the offending token and
//!   its line/column position
//! - **I/O errors**: file reading/writing failures in [`load`](crate::load) /
//!   [`save`](crate::save)
//!
//! Accessors never catch their own errors; they surface to the immediate
//! caller, who decides whether to recover (e.g., substitute a default via the
//! `*_or` accessor variants), wrap with more context, or abort.
//!
//! ## Examples
//!
//! ```rust
//! use anydoc::{Any, Error, Kind};
//!
//! let value = Any::from(3.0);
//! match value.string() {
//!     Err(Error::WrongType { expected, actual }) => {
//!         assert_eq!(expected, Kind::String);
//!         assert_eq!(actual, Kind::Number);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::lexer::Token;
use crate::Kind;
use thiserror::Error;

/// Represents all possible errors raised by document values and the text format.
///
/// Each variant includes the contextual information a caller needs to diagnose
/// the failure without re-deriving it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// An operation required one value kind but the value holds another.
    #[error("wrong type: expected {expected}, found {actual}")]
    WrongType { expected: Kind, actual: Kind },

    /// Read-only table lookup of an absent key.
    #[error("key not found: {key:?}")]
    KeyNotFound { key: String },

    /// Array index outside `[0, len)`.
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Malformed input text. Carries the offending token and its position.
    #[error("corrupt text at line {}, column {}: {message}", .token.line, .token.column)]
    CorruptText { token: Token, message: String },

    /// IO error during reading or writing.
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a type-mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use anydoc::{Error, Kind};
    ///
    /// let err = Error::wrong_type(Kind::Number, Kind::String);
    /// assert!(err.to_string().contains("expected Number"));
    /// ```
    pub fn wrong_type(expected: Kind, actual: Kind) -> Self {
        Error::WrongType { expected, actual }
    }

    /// Creates a missing-key error for a read-only table lookup.
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound {
            key: key.to_string(),
        }
    }

    /// Creates an out-of-bounds error for array indexing.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }

    /// Creates a corrupt-text error pointing at the offending token.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use anydoc::lexer::{Token, TokenKind};
    /// use anydoc::Error;
    ///
    /// let token = Token::new(TokenKind::End, 3, 7);
    /// let err = Error::corrupt_text(token, "table ended unexpectedly");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn corrupt_text(token: Token, message: &str) -> Self {
        Error::CorruptText {
            token,
            message: message.to_string(),
        }
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
