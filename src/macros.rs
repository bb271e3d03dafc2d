/// Builds an [`Any`](crate::Any) value from a literal description.
///
/// Arrays use `[...]` (the construction syntax, not the text format, which
/// serializes arrays with parentheses); tables use `{ key: value }` with bare
/// identifier keys.
///
/// # Examples
///
/// ```rust
/// use anydoc::any;
///
/// let config = any!({
///     width: 640,
///     title: "main window",
///     flags: [true, false],
/// });
///
/// assert_eq!(config.get("width").unwrap().number().unwrap(), 640.0);
/// ```
#[macro_export]
macro_rules! any {
    // The format's null literal
    (none) => {
        $crate::Any::default()
    };

    (true) => {
        $crate::Any::from(true)
    };

    (false) => {
        $crate::Any::from(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Any::array()
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Any::from(vec![$($crate::any!($elem)),*])
    };

    // Handle empty table
    ({}) => {
        $crate::Any::table()
    };

    // Handle non-empty table
    ({ $($key:ident : $value:tt),* $(,)? }) => {{
        let mut map = $crate::AnyMap::new();
        $(
            map.insert(stringify!($key).to_string(), $crate::any!($value));
        )*
        $crate::Any::from(map)
    }};

    // Fallback for any expression convertible to Any
    ($other:expr) => {
        $crate::Any::from($other)
    };
}
