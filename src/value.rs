//! Dynamic document value representation.
//!
//! This module provides [`Any`], a dynamically-typed value that behaves like a
//! cheap value type: copies are shallow and share heap payloads, mutation is
//! copy-on-write, and equality is deep and structural.
//!
//! ## Core Types
//!
//! - [`Any`]: a tagged value holding `None`, a boolean, a number, a string, an
//!   array of values, or a table of named values
//! - [`Kind`]: the type tag, used by accessors and error reporting
//!
//! ## Representation
//!
//! Booleans and numbers are stored inline. Strings, arrays, and tables live in
//! [`Arc`] payloads, so cloning an `Any` is a reference-count increment and the
//! payload is freed exactly when the last clone drops. Mutating accessors go
//! through [`Arc::make_mut`]: if the payload is shared, a private deep copy is
//! made first, so no other clone can observe the mutation. Read-only access
//! never copies.
//!
//! The reference count is atomic, so clones of the same value may be read from
//! multiple threads. Mutation of potentially-aliased values still requires
//! external synchronization; the type adds no internal locking.
//!
//! ## Metadata
//!
//! Every value can carry a free-form `comment` (attached by the deserializer
//! from `#` comments, or set explicitly). Arrays and tables can carry a `name`
//! (from the `Identifier(...)` / `Identifier{...}` constructor forms).
//! Neither participates in equality.
//!
//! Value trees must be acyclic. Payload sharing makes it impossible to build a
//! cycle through this API without interior mutability, and the crate does not
//! detect cycles at runtime.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use anydoc::Any;
//!
//! let mut table = Any::table();
//! *table.entry("width")? = Any::from(640);
//! *table.entry("height")? = Any::from(480);
//!
//! assert_eq!(table.get("width")?.number()?, 640.0);
//! assert_eq!(table.get_or("depth", Any::from(32)).number()?, 32.0);
//!
//! // Copies share the payload until one of them is mutated.
//! let copy = table.clone();
//! *table.entry("width")? = Any::from(1024);
//! assert_eq!(copy.get("width")?.number()?, 640.0);
//! # Ok::<(), anydoc::Error>(())
//! ```

use crate::{AnyMap, Error, Result};
use std::fmt;
use std::sync::Arc;

/// The type tag of a document value.
///
/// # Examples
///
/// ```rust
/// use anydoc::{Any, Kind};
///
/// assert_eq!(Any::from(42).kind(), Kind::Number);
/// assert_eq!(Any::table().kind(), Kind::Table);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    #[default]
    None,
    Boolean,
    Number,
    String,
    Array,
    Table,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::None => "None",
            Kind::Boolean => "Boolean",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Array => "Array",
            Kind::Table => "Table",
        };
        f.write_str(name)
    }
}

/// The tagged representation. Scalars are inline; the heavy kinds share
/// reference-counted payloads.
#[derive(Clone, Debug, Default)]
pub(crate) enum Repr {
    #[default]
    None,
    Boolean(bool),
    Number(f64),
    String(Arc<String>),
    Array(Arc<Vec<Any>>),
    Table(Arc<AnyMap>),
}

/// A dynamically-typed document value.
///
/// `Any` is the unit of the document data model: a scalar (`None`, boolean,
/// number), a string, an ordered heterogeneous array, or a table mapping
/// string keys to values. See the [module documentation](self) for the
/// sharing and copy-on-write semantics.
///
/// # Examples
///
/// ```rust
/// use anydoc::{Any, Kind};
///
/// let mut list = Any::array();
/// list.push(Any::from(1))?;
/// list.push(Any::from("two"))?;
///
/// assert_eq!(list.len()?, 2);
/// assert_eq!(list.at(1)?.string()?, "two");
/// assert!(list.at(5).is_err());
/// # Ok::<(), anydoc::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Any {
    pub(crate) repr: Repr,
    comment: Option<String>,
    name: Option<String>,
}

impl Any {
    fn from_repr(repr: Repr) -> Self {
        Any {
            repr,
            comment: None,
            name: None,
        }
    }

    /// Creates an empty `Array` value.
    #[must_use]
    pub fn array() -> Self {
        Any::from_repr(Repr::Array(Arc::new(Vec::new())))
    }

    /// Creates an empty `Table` value.
    #[must_use]
    pub fn table() -> Self {
        Any::from_repr(Repr::Table(Arc::new(AnyMap::new())))
    }

    /// Creates an empty `Array` value carrying a constructor name.
    ///
    /// The name serializes as `name(...)` and is readable via [`Any::name`]
    /// for consumers that dispatch on it.
    #[must_use]
    pub fn named_array(name: impl Into<String>) -> Self {
        let mut value = Any::array();
        value.name = Some(name.into());
        value
    }

    /// Creates an empty `Table` value carrying a constructor name.
    #[must_use]
    pub fn named_table(name: impl Into<String>) -> Self {
        let mut value = Any::table();
        value.name = Some(name.into());
        value
    }

    /// Returns the type tag of this value.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        match &self.repr {
            Repr::None => Kind::None,
            Repr::Boolean(_) => Kind::Boolean,
            Repr::Number(_) => Kind::Number,
            Repr::String(_) => Kind::String,
            Repr::Array(_) => Kind::Array,
            Repr::Table(_) => Kind::Table,
        }
    }

    /// Returns `true` if the value is `None`.
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self.repr, Repr::None)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self.repr, Repr::Boolean(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.repr, Repr::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self.repr, Repr::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.repr, Repr::Array(_))
    }

    /// Returns `true` if the value is a table.
    #[inline]
    #[must_use]
    pub fn is_table(&self) -> bool {
        matches!(self.repr, Repr::Table(_))
    }

    /// Returns the boolean value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not a boolean.
    pub fn boolean(&self) -> Result<bool> {
        match self.repr {
            Repr::Boolean(b) => Ok(b),
            _ => Err(Error::wrong_type(Kind::Boolean, self.kind())),
        }
    }

    /// Returns the boolean value, or `default` if the value is not a boolean.
    #[must_use]
    pub fn boolean_or(&self, default: bool) -> bool {
        self.boolean().unwrap_or(default)
    }

    /// Returns the numeric value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not a number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use anydoc::{Any, Error, Kind};
    ///
    /// assert_eq!(Any::from(2.5).number()?, 2.5);
    /// assert_eq!(
    ///     Any::from("text").number(),
    ///     Err(Error::wrong_type(Kind::Number, Kind::String))
    /// );
    /// # Ok::<(), anydoc::Error>(())
    /// ```
    pub fn number(&self) -> Result<f64> {
        match self.repr {
            Repr::Number(n) => Ok(n),
            _ => Err(Error::wrong_type(Kind::Number, self.kind())),
        }
    }

    /// Returns the numeric value, or `default` if the value is not a number.
    #[must_use]
    pub fn number_or(&self, default: f64) -> f64 {
        self.number().unwrap_or(default)
    }

    /// Returns the string contents.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not a string.
    pub fn string(&self) -> Result<&str> {
        match &self.repr {
            Repr::String(s) => Ok(s.as_str()),
            _ => Err(Error::wrong_type(Kind::String, self.kind())),
        }
    }

    /// Returns the string contents, or `default` if the value is not a string.
    #[must_use]
    pub fn string_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.string().unwrap_or(default)
    }

    /// Returns an exclusive reference to the string contents, copying the
    /// payload first if it is shared.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not a string.
    pub fn string_mut(&mut self) -> Result<&mut String> {
        let kind = self.kind();
        match &mut self.repr {
            Repr::String(s) => Ok(Arc::make_mut(s)),
            _ => Err(Error::wrong_type(Kind::String, kind)),
        }
    }

    /// Returns the number of elements in an array or entries in a table.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] for every other kind.
    pub fn len(&self) -> Result<usize> {
        match &self.repr {
            Repr::Array(elements) => Ok(elements.len()),
            Repr::Table(entries) => Ok(entries.len()),
            _ => Err(Error::wrong_type(Kind::Array, self.kind())),
        }
    }

    /// Returns `true` if an array or table has no elements.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] for non-container kinds.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Returns the elements of an array, read-only.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not an array.
    pub fn elements(&self) -> Result<&[Any]> {
        match &self.repr {
            Repr::Array(elements) => Ok(elements),
            _ => Err(Error::wrong_type(Kind::Array, self.kind())),
        }
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not an array, or
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&Any> {
        let elements = self.elements()?;
        elements
            .get(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, elements.len()))
    }

    /// Returns an exclusive reference to the element at `index`, copying the
    /// array payload first if it is shared.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not an array, or
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Any> {
        let elements = self.array_mut()?;
        let len = elements.len();
        elements
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, len))
    }

    /// Appends a value to the end of an array.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not an array.
    pub fn push(&mut self, value: impl Into<Any>) -> Result<()> {
        self.array_mut()?.push(value.into());
        Ok(())
    }

    /// Appends every value of an iterator to the end of an array.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not an array.
    pub fn extend<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Any>,
    {
        let elements = self.array_mut()?;
        elements.extend(values.into_iter().map(Into::into));
        Ok(())
    }

    /// Returns the entries of a table, read-only.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not a table.
    pub fn entries(&self) -> Result<&AnyMap> {
        match &self.repr {
            Repr::Table(entries) => Ok(entries),
            _ => Err(Error::wrong_type(Kind::Table, self.kind())),
        }
    }

    /// Returns the value stored at `key`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not a table, or
    /// [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use anydoc::{Any, Error};
    ///
    /// let table = Any::table();
    /// assert_eq!(
    ///     table.get("missing"),
    ///     Err(Error::key_not_found("missing"))
    /// );
    /// ```
    pub fn get(&self, key: &str) -> Result<&Any> {
        self.entries()?
            .get(key)
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Returns the value stored at `key`, or `default` if the value is not a
    /// table or the key is absent. Never creates an entry.
    #[must_use]
    pub fn get_or(&self, key: &str, default: Any) -> Any {
        match self.get(key) {
            Ok(value) => value.clone(),
            Err(_) => default,
        }
    }

    /// Returns an exclusive reference to the entry at `key`, inserting a
    /// `None` value if the key is absent. The table payload is copied first
    /// if it is shared.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not a table.
    pub fn entry(&mut self, key: &str) -> Result<&mut Any> {
        Ok(self.table_mut()?.entry_or_none(key))
    }

    /// Inserts `value` at `key`, replacing and returning any previous value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] if the value is not a table.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Any>) -> Result<Option<Any>> {
        Ok(self.table_mut()?.insert(key.into(), value.into()))
    }

    /// Returns the constructor name, if this container carries one.
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Attaches a constructor name. Only arrays and tables may be named.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WrongType`] for non-container kinds.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        match self.repr {
            Repr::Array(_) | Repr::Table(_) => {
                self.name = Some(name.into());
                Ok(())
            }
            _ => Err(Error::wrong_type(Kind::Array, self.kind())),
        }
    }

    /// Returns the comment attached to this value, if any.
    #[inline]
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Attaches a comment, replacing any existing one.
    ///
    /// The serializer emits each comment line prefixed with `#` immediately
    /// before the value.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    /// Prepends a comment line in front of any existing comment.
    ///
    /// Stacked `#` lines in input text compose front-to-back through this
    /// method during deserialization.
    pub fn prepend_comment(&mut self, text: &str) {
        self.comment = Some(match self.comment.take() {
            Some(existing) => format!("{text}\n{existing}"),
            None => text.to_string(),
        });
    }

    fn array_mut(&mut self) -> Result<&mut Vec<Any>> {
        let kind = self.kind();
        match &mut self.repr {
            Repr::Array(elements) => Ok(Arc::make_mut(elements)),
            _ => Err(Error::wrong_type(Kind::Array, kind)),
        }
    }

    fn table_mut(&mut self) -> Result<&mut AnyMap> {
        let kind = self.kind();
        match &mut self.repr {
            Repr::Table(entries) => Ok(Arc::make_mut(entries)),
            _ => Err(Error::wrong_type(Kind::Table, kind)),
        }
    }

    /// Number of live references to this value's payload, for tests that
    /// verify sharing behavior. Scalars report 1.
    #[doc(hidden)]
    #[must_use]
    pub fn payload_refs(&self) -> usize {
        match &self.repr {
            Repr::String(s) => Arc::strong_count(s),
            Repr::Array(elements) => Arc::strong_count(elements),
            Repr::Table(entries) => Arc::strong_count(entries),
            _ => 1,
        }
    }
}

/// Deep structural equality. `comment` and `name` are excluded; aliased
/// payloads compare equal without walking their contents.
impl PartialEq for Any {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::None, Repr::None) => true,
            (Repr::Boolean(a), Repr::Boolean(b)) => a == b,
            (Repr::Number(a), Repr::Number(b)) => a == b,
            (Repr::String(a), Repr::String(b)) => Arc::ptr_eq(a, b) || a == b,
            (Repr::Array(a), Repr::Array(b)) => Arc::ptr_eq(a, b) || a == b,
            (Repr::Table(a), Repr::Table(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Any {
    /// Formats the value in its canonical text form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::ser::write_value(f, self, &crate::FormatOptions::default())
    }
}

impl From<bool> for Any {
    fn from(value: bool) -> Self {
        Any::from_repr(Repr::Boolean(value))
    }
}

impl From<f32> for Any {
    fn from(value: f32) -> Self {
        Any::from_repr(Repr::Number(value as f64))
    }
}

impl From<f64> for Any {
    fn from(value: f64) -> Self {
        Any::from_repr(Repr::Number(value))
    }
}

impl From<i32> for Any {
    fn from(value: i32) -> Self {
        Any::from_repr(Repr::Number(value as f64))
    }
}

impl From<i64> for Any {
    fn from(value: i64) -> Self {
        Any::from_repr(Repr::Number(value as f64))
    }
}

impl From<u32> for Any {
    fn from(value: u32) -> Self {
        Any::from_repr(Repr::Number(value as f64))
    }
}

impl From<&str> for Any {
    fn from(value: &str) -> Self {
        Any::from_repr(Repr::String(Arc::new(value.to_string())))
    }
}

impl From<String> for Any {
    fn from(value: String) -> Self {
        Any::from_repr(Repr::String(Arc::new(value)))
    }
}

impl From<Vec<Any>> for Any {
    fn from(value: Vec<Any>) -> Self {
        Any::from_repr(Repr::Array(Arc::new(value)))
    }
}

impl From<AnyMap> for Any {
    fn from(value: AnyMap) -> Self {
        Any::from_repr(Repr::Table(Arc::new(value)))
    }
}

impl FromIterator<Any> for Any {
    fn from_iter<T: IntoIterator<Item = Any>>(iter: T) -> Self {
        Any::from(iter.into_iter().collect::<Vec<Any>>())
    }
}

/// Bridges `Any` to the serde data model: `None` maps to unit, numbers to
/// `f64`, arrays to sequences, tables to maps. `comment` and `name` have no
/// counterpart in the data model and are dropped in transit; the native
/// deserializer/serializer pair is the fidelity-preserving path.
impl serde::Serialize for Any {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match &self.repr {
            Repr::None => serializer.serialize_unit(),
            Repr::Boolean(b) => serializer.serialize_bool(*b),
            Repr::Number(n) => serializer.serialize_f64(*n),
            Repr::String(s) => serializer.serialize_str(s),
            Repr::Array(elements) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Repr::Table(entries) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, entry) in entries.iter() {
                    map.serialize_entry(key, entry)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> serde::Deserialize<'de> for Any {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct AnyVisitor;

        impl<'de> Visitor<'de> for AnyVisitor {
            type Value = Any;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any document value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(Any::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(Any::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
                Ok(Any::from(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(Any::from(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(Any::from(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(Any::from(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Any::default())
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Any::default())
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                serde::Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut elements = Vec::new();
                while let Some(element) = seq.next_element()? {
                    elements.push(element);
                }
                Ok(Any::from(elements))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut entries = AnyMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    entries.insert(key, value);
                }
                Ok(Any::from(entries))
            }
        }

        deserializer.deserialize_any(AnyVisitor)
    }
}
