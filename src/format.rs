//! Text format reference.
//!
//! This module documents the text format read by [`from_str`](crate::from_str)
//! and written by [`to_string`](crate::to_string). It contains no code.
//!
//! # Grammar
//!
//! ```text
//! identifier  ::= (letter | "_") (letter | digit | "_")*
//! comment     ::= "#" <any characters up to newline>
//! number      ::= <C-style numeric literal>
//! string      ::= <double-quoted string, backslash-escaped>
//! boolean     ::= "True" | "False"
//! none        ::= "None"
//! array       ::= "(" [value ("," value)*] ")"
//! pair        ::= identifier "=" value
//! table       ::= "{" [pair ("," pair)*] "}"
//! named-array ::= identifier array
//! named-table ::= identifier table
//! value       ::= [comment] (none | number | boolean | string
//!                            | array | table | named-array | named-table)
//! ```
//!
//! Whitespace is insignificant except that a comment extends to the end of
//! its line. Newlines may stand in for the `,` separators inside containers.
//! On input, `[` and `]` are accepted as synonyms for `(` and `)`; output
//! always uses parentheses. Keyword literals are matched case-insensitively
//! on input and emitted in their canonical capitalized form.
//!
//! A *document* (a whole file) is either a single value or a brace-less
//! sequence of pairs, which parses as a table:
//!
//! ```text
//! # scene defaults
//! ambient = (0.1, 0.1, 0.12)
//! sky = Texture{ path = "sky.tex" }
//! ```
//!
//! # Comments
//!
//! A `#` comment attaches to the value that follows it and survives a
//! load/save round trip. Stacked comment lines compose into one multi-line
//! comment, re-emitted one `#` per line.
//!
//! # Canonical output
//!
//! The serializer emits a deterministic form: table keys in ascending
//! lexicographic order, four spaces per nesting level, and aggregates flowed
//! onto one line when the flat rendering fits the width budget (80 columns
//! by default; see [`FormatOptions`](crate::FormatOptions)). Container names
//! print immediately before the opening bracket: `Gradient(0, 1)`.
