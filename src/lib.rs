//! # anydoc
//!
//! Dynamically-typed, copy-on-write document values with a human-readable
//! text format.
//!
//! ## What is anydoc?
//!
//! `anydoc` provides [`Any`], a dynamic value that holds `None`, booleans,
//! numbers, strings, arrays, or string-keyed tables, and a text format for
//! reading and writing trees of such values. It is designed for
//! configuration-style data (material specifications, asset descriptions,
//! tool settings) where the structure is open-ended and the files are
//! written and diffed by people.
//!
//! ## Key Features
//!
//! - **Value semantics, shared storage**: cloning an `Any` is a
//!   reference-count increment; string, array, and table payloads are shared
//!   until a mutation needs exclusive ownership (copy-on-write)
//! - **Deep equality**: values compare structurally; comments and names are
//!   metadata and never affect equality
//! - **Comment-preserving**: `#` comments attach to the value they precede
//!   and are re-emitted on save
//! - **Named containers**: `Emitter(1, 2, 3)` and `Config{ size = 8 }` carry
//!   their constructor name for dispatch-by-name consumers
//! - **Deterministic output**: table keys serialize in sorted order, with a
//!   width budget deciding between one-line and indented forms
//!
//! ## Quick Start
//!
//! ```rust
//! use anydoc::{any, from_str, to_string};
//!
//! let value = from_str("{ b = 2, a = (1, True, \"x\") }")?;
//! assert_eq!(value.get("b")?.number()?, 2.0);
//! assert_eq!(value.get("a")?.at(2)?.string()?, "x");
//!
//! // Canonical form: sorted keys, `(`-arrays
//! assert_eq!(to_string(&value), "{a = (1, True, \"x\"), b = 2}");
//!
//! // Building values in code
//! let built = any!({ a: [1, true, "x"], b: 2 });
//! assert_eq!(built, value);
//! # Ok::<(), anydoc::Error>(())
//! ```
//!
//! ## Copy-on-write
//!
//! ```rust
//! use anydoc::Any;
//!
//! let mut a = Any::table();
//! *a.entry("k")? = Any::from(1);
//!
//! let b = a.clone();            // shares the payload
//! *a.entry("k")? = Any::from(2); // detaches a private copy first
//!
//! assert_eq!(b.get("k")?.number()?, 1.0);
//! # Ok::<(), anydoc::Error>(())
//! ```
//!
//! ## Text format
//!
//! ```text
//! identifier  ::= (letter | "_") (letter | digit | "_")*
//! comment     ::= "#" <any characters up to newline>
//! array       ::= "(" [value ("," value)*] ")"   ; "[" "]" accepted on input
//! pair        ::= identifier "=" value
//! table       ::= "{" [pair ("," pair)*] "}"
//! named-array ::= identifier array
//! named-table ::= identifier table
//! value       ::= [comment] (None | number | True | False | string
//!                            | array | table | named-array | named-table)
//! ```
//!
//! A document is either one value or a brace-less sequence of pairs (parsed
//! as a table). Parsing malformed or adversarial input runs to completion or
//! failure; recursion depth is not bounded by the crate.
//!
//! ## Threading
//!
//! Payload reference counts are atomic, so clones of the same value can be
//! read freely from multiple threads. Mutating values that may alias the
//! same payload requires external synchronization.

pub mod de;
pub mod error;
pub mod format;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{deserialize, deserialize_document};
pub use error::{Error, Result};
pub use lexer::{Lexer, TokenStream};
pub use map::AnyMap;
pub use options::FormatOptions;
pub use ser::serialize;
pub use value::{Any, Kind};

use std::fs;
use std::path::Path;

/// Deserializes one document from a string.
///
/// # Examples
///
/// ```rust
/// use anydoc::from_str;
///
/// let value = from_str("Emitter(1, 2, 3)")?;
/// assert_eq!(value.name(), Some("Emitter"));
/// # Ok::<(), anydoc::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::CorruptText`] if the input is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str) -> Result<Any> {
    let mut lexer = Lexer::new(input);
    de::deserialize_document(&mut lexer)
}

/// Serializes a value to its canonical text form with default formatting.
///
/// # Examples
///
/// ```rust
/// use anydoc::{any, to_string};
///
/// assert_eq!(to_string(&any!([1, 2])), "(1, 2)");
/// ```
#[must_use]
pub fn to_string(value: &Any) -> String {
    to_string_with_options(value, &FormatOptions::default())
}

/// Serializes a value to its canonical text form with custom formatting.
#[must_use]
pub fn to_string_with_options(value: &Any, options: &FormatOptions) -> String {
    let mut out = String::new();
    ser::serialize(&mut out, value, options).expect("writing to a String cannot fail");
    out
}

/// Loads a document from the named file.
///
/// The token source is configured the way the format expects: `#` line
/// comments recognized, `True`/`False`/`None` matched case-insensitively.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or
/// [`Error::CorruptText`] if its contents are malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn load(path: impl AsRef<Path>) -> Result<Any> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(&e.to_string()))?;
    from_str(&text)
}

/// Saves a value to the named file in canonical form.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn save(path: impl AsRef<Path>, value: &Any) -> Result<()> {
    save_with_options(path, value, &FormatOptions::default())
}

/// Saves a value to the named file with custom formatting.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn save_with_options(
    path: impl AsRef<Path>,
    value: &Any,
    options: &FormatOptions,
) -> Result<()> {
    let mut text = to_string_with_options(value, options);
    text.push('\n');
    fs::write(path, text).map_err(|e| Error::io(&e.to_string()))
}
