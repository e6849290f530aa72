//! Macros for building tracked path lists.

/// Build a [`Paths`](crate::core::Paths) from string literals.
///
/// `paths![]` tracks the whole state.
///
/// # Example
///
/// ```
/// use undoable::paths;
///
/// let tracked = paths!["title", "body"];
/// assert_eq!(tracked.len(), 2);
/// assert!(paths![].is_all());
/// ```
#[macro_export]
macro_rules! paths {
    () => {
        $crate::core::Paths::all()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::core::Paths::keys([$($key),+])
    };
}
