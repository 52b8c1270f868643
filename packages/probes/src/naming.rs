//! Section names inferred from the calling function.

/// Section name used when the calling function cannot be determined.
pub const UNKNOWN_SECTION: &str = "unknown";

// Must match the name of the marker function declared by `probe!`.
const MARKER_SUFFIX: &str = "::__probes_marker";

const CLOSURE_SUFFIX: &str = "::{{closure}}";

/// Starts a [`Probe`](crate::Probe) named after the enclosing function.
///
/// The name is the fully qualified path of the function containing the macro call,
/// for example `my_app::parser::parse_header`. Closures and async blocks are attributed
/// to the function that contains them. If the path cannot be determined, the section is
/// named [`UNKNOWN_SECTION`].
///
/// # Examples
///
/// ```
/// use probes::{Store, probe};
///
/// fn parse_header(store: &Store) {
///     let _guard = probe!(store).guard();
///     // Work measured here.
/// }
///
/// let store = Store::new();
/// parse_header(&store);
///
/// let report = store.to_report();
/// assert!(report.entries().next().unwrap().name().ends_with("parse_header"));
/// ```
///
/// Units can be attached like with any other probe:
///
/// ```
/// use probes::{Store, probe};
///
/// fn encode_all(store: &Store, items: &[u8]) {
///     let _guard = probe!(store).with_units(items.len() as i64).guard();
///     // Work measured here.
/// }
///
/// let store = Store::new();
/// encode_all(&store, &[1, 2, 3]);
/// assert_eq!(store.to_report().entries().next().unwrap().units(), 3);
/// ```
#[macro_export]
macro_rules! probe {
    ($store:expr) => {{
        fn __probes_marker() {}
        $store.start($crate::__private::section_name_from_marker(
            ::std::any::type_name_of_val(&__probes_marker),
        ))
    }};
}

/// Derives the section name from the type name of the marker function declared by `probe!`.
///
/// The type name is best effort in the standard library, so anything unexpected becomes
/// [`UNKNOWN_SECTION`].
#[must_use]
pub fn section_name_from_marker(marker_type_name: &str) -> String {
    let Some(mut path) = marker_type_name.strip_suffix(MARKER_SUFFIX) else {
        return UNKNOWN_SECTION.to_owned();
    };

    while let Some(outer) = path.strip_suffix(CLOSURE_SUFFIX) {
        path = outer;
    }

    if path.is_empty() {
        UNKNOWN_SECTION.to_owned()
    } else {
        path.to_owned()
    }
}
