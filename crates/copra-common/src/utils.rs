//! Utility functions for Copra
//!
//! Common helper functions used across the codebase.

use std::sync::LazyLock;

/// Regex pattern for validating identifiers (setup names, service names)
static VALID_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new("^[a-zA-Z0-9_.:-]+$").expect("Invalid regex pattern"));

/// Validate a string contains only allowed identifier characters
///
/// Allowed characters: alphanumeric, underscore, dot, colon, hyphen.
/// The empty string is not a valid identifier.
///
/// # Examples
///
/// ```
/// use copra_common::is_valid;
///
/// assert!(is_valid("prod-eu1"));
/// assert!(is_valid("gm.core.butler:v2"));
/// assert!(!is_valid("invalid/path"));
/// assert!(!is_valid(""));
/// ```
pub fn is_valid(str: &str) -> bool {
    VALID_PATTERN.is_match(str)
}

/// Split a comma-separated service-name parameter into individual names.
///
/// Each segment is trimmed of surrounding whitespace. Duplicates are kept
/// as-is; existence checks downstream decide whether a name is acceptable.
///
/// # Examples
///
/// ```
/// use copra_common::split_service_names;
///
/// assert_eq!(
///     split_service_names("auth, billing ,auth"),
///     vec!["auth", "billing", "auth"]
/// );
/// ```
pub fn split_service_names(param: &str) -> Vec<String> {
    param
        .split(',')
        .map(|name| name.trim().to_string())
        .collect()
}
