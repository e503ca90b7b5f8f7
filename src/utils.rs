//! Common utility functions shared across the codebase.

use std::path::Path;

/// ASCII case-insensitive `starts_with`.
///
/// # Examples
///
/// ```
/// use tslister::utils::starts_with_ignore_case;
///
/// assert!(starts_with_ignore_case("serenity.CoreLib.d.ts", "Serenity."));
/// assert!(!starts_with_ignore_case("Ser", "Serenity."));
/// ```
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// ASCII case-insensitive `ends_with`.
///
/// # Examples
///
/// ```
/// use tslister::utils::ends_with_ignore_case;
///
/// assert!(ends_with_ignore_case("Widgets.D.TS", ".d.ts"));
/// assert!(!ends_with_ignore_case("Widgets.ts", ".d.ts"));
/// ```
pub fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    text.len() >= suffix.len()
        && text.as_bytes()[text.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

/// Render a path with forward slashes, regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Path of `path` relative to `base`, rendered with forward slashes.
///
/// Falls back to the full path when `path` is not under `base`.
pub fn relative_display(path: &Path, base: &Path) -> String {
    to_slash(path.strip_prefix(base).unwrap_or(path))
}
