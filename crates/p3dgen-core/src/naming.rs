//! Naming convention utilities for generated C++.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `name` | [`capitalize`] | `Name` |
//! | `name` | [`accessor_name`] | `GetName` |
//! | `name` | [`member_name`] | `_name` |

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use p3dgen_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize("numVertices"), "NumVertices");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Public getter name for a schema field.
pub fn accessor_name(field: &str) -> String {
    format!("Get{}", capitalize(field))
}

/// Private storage name for a schema field.
pub fn member_name(field: &str) -> String {
    format!("_{field}")
}
