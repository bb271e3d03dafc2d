//! Canonical text serialization.
//!
//! This module provides [`serialize`], the depth-first tree walk that emits a
//! value in its canonical textual form. The serializer is purely a function
//! of the value tree; it does not matter whether the tree was built by hand
//! or by deserialization. That is the contract that makes load/save round
//! trips stable modulo re-ordering of table keys and re-flowing of line
//! breaks.
//!
//! Formatting policy:
//!
//! - Scalars print in their natural literal form: `None`, `True`/`False`,
//!   default numeric formatting, quoted-and-escaped strings
//! - Arrays print as `(` elements `)`; the serializer never emits the `[`
//!   spelling the deserializer also accepts
//! - Tables print as `{` `key = value` pairs `}` with keys in ascending
//!   lexicographic order, regardless of insertion order
//! - A named container prints its name immediately before the opening
//!   bracket with no intervening space
//! - An aggregate prints on one line when its flat rendering fits the width
//!   budget and none of its contents carry comments; otherwise each element
//!   goes on its own indented line
//! - A value's comment prints immediately before it, one `#` prefix per line
//!
//! ## Examples
//!
//! ```rust
//! use anydoc::{any, to_string};
//!
//! let value = any!({ b: 1, a: 2 });
//! assert_eq!(to_string(&value), "{a = 2, b = 1}");
//! ```

use crate::{Any, FormatOptions, Kind};
use std::fmt::{self, Write};

/// Serializes a value to a text sink in canonical form.
///
/// # Errors
///
/// Fails only if the sink fails; the walk itself cannot fail.
pub fn serialize<W: Write>(out: &mut W, value: &Any, options: &FormatOptions) -> fmt::Result {
    write_value(out, value, options)
}

pub(crate) fn write_value<W: Write>(
    out: &mut W,
    value: &Any,
    options: &FormatOptions,
) -> fmt::Result {
    write_element(out, value, options, 0)
}

/// Writes comment lines (if any) and the value itself at `level`.
fn write_element<W: Write>(
    out: &mut W,
    value: &Any,
    options: &FormatOptions,
    level: usize,
) -> fmt::Result {
    if let Some(comment) = value.comment() {
        for line in comment.split('\n') {
            write_indent(out, options, level)?;
            writeln!(out, "#{line}")?;
        }
    }
    write_indent(out, options, level)?;
    write_body(out, value, options, level)
}

/// Writes the value body, assuming indentation for the first line has
/// already been written.
fn write_body<W: Write>(
    out: &mut W,
    value: &Any,
    options: &FormatOptions,
    level: usize,
) -> fmt::Result {
    match value.kind() {
        Kind::None | Kind::Boolean | Kind::Number | Kind::String => write_scalar(out, value),
        Kind::Array => {
            if fits_on_line(value, options, level) {
                write_flat(out, value)
            } else {
                if let Some(name) = value.name() {
                    out.write_str(name)?;
                }
                out.write_str("(\n")?;
                let elements = value.elements().unwrap_or(&[]);
                for (index, element) in elements.iter().enumerate() {
                    write_element(out, element, options, level + 1)?;
                    if index + 1 < elements.len() {
                        out.write_char(',')?;
                    }
                    out.write_char('\n')?;
                }
                write_indent(out, options, level)?;
                out.write_char(')')
            }
        }
        Kind::Table => {
            if fits_on_line(value, options, level) {
                write_flat(out, value)
            } else {
                if let Some(name) = value.name() {
                    out.write_str(name)?;
                }
                out.write_str("{\n")?;
                if let Ok(entries) = value.entries() {
                    let keys = entries.sorted_keys();
                    for (index, key) in keys.iter().enumerate() {
                        let entry = &entries[*key];
                        if let Some(comment) = entry.comment() {
                            for line in comment.split('\n') {
                                write_indent(out, options, level + 1)?;
                                writeln!(out, "#{line}")?;
                            }
                        }
                        write_indent(out, options, level + 1)?;
                        write!(out, "{key} = ")?;
                        write_body(out, entry, options, level + 1)?;
                        if index + 1 < keys.len() {
                            out.write_char(',')?;
                        }
                        out.write_char('\n')?;
                    }
                }
                write_indent(out, options, level)?;
                out.write_char('}')
            }
        }
    }
}

fn write_scalar<W: Write>(out: &mut W, value: &Any) -> fmt::Result {
    match value.kind() {
        Kind::None => out.write_str("None"),
        Kind::Boolean => out.write_str(if value.boolean().unwrap_or(false) {
            "True"
        } else {
            "False"
        }),
        Kind::Number => write!(out, "{}", value.number().unwrap_or(0.0)),
        Kind::String => write_quoted(out, value.string().unwrap_or("")),
        _ => unreachable!("write_scalar called on an aggregate"),
    }
}

fn write_quoted<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in text.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\0' => out.write_str("\\0")?,
            _ => out.write_char(ch)?,
        }
    }
    out.write_char('"')
}

/// Single-line rendering, ignoring comments. Used both for the width check
/// and as the emitted form when it fits.
fn write_flat<W: Write>(out: &mut W, value: &Any) -> fmt::Result {
    match value.kind() {
        Kind::Array => {
            if let Some(name) = value.name() {
                out.write_str(name)?;
            }
            out.write_char('(')?;
            let elements = value.elements().unwrap_or(&[]);
            for (index, element) in elements.iter().enumerate() {
                if index > 0 {
                    out.write_str(", ")?;
                }
                write_flat(out, element)?;
            }
            out.write_char(')')
        }
        Kind::Table => {
            if let Some(name) = value.name() {
                out.write_str(name)?;
            }
            out.write_char('{')?;
            if let Ok(entries) = value.entries() {
                for (index, key) in entries.sorted_keys().iter().enumerate() {
                    if index > 0 {
                        out.write_str(", ")?;
                    }
                    write!(out, "{key} = ")?;
                    write_flat(out, &entries[*key])?;
                }
            }
            out.write_char('}')
        }
        _ => write_scalar(out, value),
    }
}

fn fits_on_line(value: &Any, options: &FormatOptions, level: usize) -> bool {
    if has_inner_comment(value) {
        return false;
    }
    let mut flat = String::new();
    if write_flat(&mut flat, value).is_err() {
        return false;
    }
    level * options.indent + flat.len() <= options.width
}

/// True if any element or entry, at any depth, carries a comment. Such
/// aggregates must be broken across lines so the comments have somewhere
/// to go.
fn has_inner_comment(value: &Any) -> bool {
    match value.kind() {
        Kind::Array => value
            .elements()
            .map(|elements| {
                elements
                    .iter()
                    .any(|e| e.comment().is_some() || has_inner_comment(e))
            })
            .unwrap_or(false),
        Kind::Table => value
            .entries()
            .map(|entries| {
                entries
                    .values()
                    .any(|e| e.comment().is_some() || has_inner_comment(e))
            })
            .unwrap_or(false),
        _ => false,
    }
}

fn write_indent<W: Write>(out: &mut W, options: &FormatOptions, level: usize) -> fmt::Result {
    for _ in 0..level * options.indent {
        out.write_char(' ')?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{any, from_str, to_string, to_string_with_options, Any, FormatOptions};

    #[test]
    fn test_scalars() {
        assert_eq!(to_string(&Any::default()), "None");
        assert_eq!(to_string(&Any::from(true)), "True");
        assert_eq!(to_string(&Any::from(false)), "False");
        assert_eq!(to_string(&Any::from(2.5)), "2.5");
        assert_eq!(to_string(&Any::from(3)), "3");
        assert_eq!(to_string(&Any::from("hi")), "\"hi\"");
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(to_string(&Any::from("a\"b\\c\n")), r#""a\"b\\c\n""#);
    }

    #[test]
    fn test_flat_array() {
        assert_eq!(to_string(&any!([1, 2, 3])), "(1, 2, 3)");
        assert_eq!(to_string(&Any::array()), "()");
    }

    #[test]
    fn test_table_keys_sorted() {
        let value = any!({ b: 1, a: 2, c: 3 });
        assert_eq!(to_string(&value), "{a = 2, b = 1, c = 3}");
    }

    #[test]
    fn test_named_containers() {
        let mut array = Any::named_array("Foo");
        array.push(Any::from(1)).unwrap();
        assert_eq!(to_string(&array), "Foo(1)");

        let mut table = Any::named_table("Config");
        table.insert("x", Any::from(1)).unwrap();
        assert_eq!(to_string(&table), "Config{x = 1}");
    }

    #[test]
    fn test_width_budget_breaks_lines() {
        let value = any!([100, 200, 300]);
        let narrow = FormatOptions::new().with_width(8);
        let text = to_string_with_options(&value, &narrow);
        assert_eq!(text, "(\n    100,\n    200,\n    300\n)");
        // and the broken form still parses back to the same tree
        assert_eq!(from_str(&text).unwrap(), value);
    }

    #[test]
    fn test_indent_option() {
        let value = any!([1]);
        let narrow = FormatOptions::new().with_width(0).with_indent(2);
        assert_eq!(to_string_with_options(&value, &narrow), "(\n  1\n)");
    }

    #[test]
    fn test_comment_emitted_before_value() {
        let mut value = Any::from(3);
        value.set_comment(" note");
        assert_eq!(to_string(&value), "# note\n3");
    }

    #[test]
    fn test_commented_element_forces_multiline() {
        let mut element = Any::from(1);
        element.set_comment(" why");
        let mut array = Any::array();
        array.push(element).unwrap();
        array.push(Any::from(2)).unwrap();
        assert_eq!(to_string(&array), "(\n    # why\n    1,\n    2\n)");
    }

    #[test]
    fn test_commented_pair_in_table() {
        let mut entry = Any::from(3);
        entry.set_comment(" note");
        let mut table = Any::table();
        table.insert("x", entry).unwrap();
        assert_eq!(to_string(&table), "{\n    # note\n    x = 3\n}");
    }

    #[test]
    fn test_nested_multiline() {
        let value = any!({ outer: { a: 1 } });
        let narrow = FormatOptions::new().with_width(16);
        let text = to_string_with_options(&value, &narrow);
        assert_eq!(text, "{\n    outer = {a = 1}\n}");
    }
}
