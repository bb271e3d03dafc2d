//! Configuration options for text serialization.
//!
//! [`FormatOptions`] controls the formatting policy of the canonical
//! serializer: indentation width and the line-width budget that decides when
//! an aggregate is flowed onto one line.
//!
//! ## Examples
//!
//! ```rust
//! use anydoc::{any, to_string_with_options, FormatOptions};
//!
//! let value = any!([1, 2, 3]);
//!
//! // Default: 4-space indent, 80-column budget
//! let text = to_string_with_options(&value, &FormatOptions::default());
//! assert_eq!(text, "(1, 2, 3)");
//!
//! // A tiny budget forces one element per line
//! let narrow = FormatOptions::new().with_width(4);
//! let text = to_string_with_options(&value, &narrow);
//! assert!(text.contains('\n'));
//! ```

/// Formatting policy for the canonical serializer.
///
/// The serializer always sorts table keys and always emits `(`/`)` arrays;
/// these options only control whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces added per nesting level.
    pub indent: usize,
    /// Column budget: an aggregate is printed on a single line when its
    /// flat rendering, including the current indentation, fits.
    pub width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            indent: 4,
            width: 80,
        }
    }
}

impl FormatOptions {
    /// Creates the default options (4-space indent, 80-column width budget).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the line-width budget for single-line aggregates.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}
