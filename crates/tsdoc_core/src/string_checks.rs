//! Validation predicates for names that appear inside doc comments.
//!
//! Each `explain_if_invalid_*` function returns `None` for a valid input and
//! otherwise a human-readable explanation suitable for a diagnostic.

use once_cell::sync::Lazy;
use regex::Regex;

static TSDOC_TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@[a-zA-Z][a-zA-Z0-9]*$").unwrap());
static URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*://").unwrap());
static URL_SCHEME_AFTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*://.").unwrap());
static HTML_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9\-]*$").unwrap());
static PACKAGE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:@[a-zA-Z0-9\-_.]+/)?[a-zA-Z0-9\-_.]+$").unwrap());
static IDENTIFIER_BAD_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_$]").unwrap());

const SYSTEM_SELECTORS: &[&str] = &[
    "instance",
    "static",
    "constructor",
    "class",
    "enum",
    "function",
    "interface",
    "namespace",
    "type",
    "variable",
];

/// Tag names are `@` followed by a letter and then letters or digits.
pub fn explain_if_invalid_tsdoc_tag_name(tag_name: &str) -> Option<String> {
    if tag_name.is_empty() {
        return Some("A TSDoc tag name cannot be an empty string".to_string());
    }
    if !tag_name.starts_with('@') {
        return Some("A TSDoc tag name must start with an \"@\" symbol".to_string());
    }
    if !TSDOC_TAG_NAME.is_match(tag_name) {
        return Some(
            "A TSDoc tag name must start with a letter and contain only letters and numbers"
                .to_string(),
        );
    }
    None
}

pub fn explain_if_invalid_link_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return Some("The URL cannot be empty".to_string());
    }
    if !URL_SCHEME.is_match(url) {
        return Some(
            "An @link URL must begin with a scheme comprised only of letters and numbers \
             followed by \"://\". (For general URLs, use an HTML \"<a>\" tag instead.)"
                .to_string(),
        );
    }
    if !URL_SCHEME_AFTER.is_match(url) {
        return Some("An @link URL must have at least one character after \"://\"".to_string());
    }
    None
}

pub fn explain_if_invalid_html_name(html_name: &str) -> Option<String> {
    if !HTML_NAME.is_match(html_name) {
        return Some(
            "An HTML name must be an ASCII letter followed by zero or more letters, digits, or hyphens"
                .to_string(),
        );
    }
    None
}

/// NPM-style package names, optionally scoped: `my-package` or `@scope/my-package`.
pub fn explain_if_invalid_package_name(package_name: &str) -> Option<String> {
    if package_name.is_empty() {
        return Some("The package name cannot be an empty string".to_string());
    }
    if !PACKAGE_NAME.is_match(package_name) {
        return Some(format!(
            "The package name {:?} is not a valid package name",
            package_name
        ));
    }
    None
}

pub fn explain_if_invalid_import_path(
    import_path: &str,
    prefixed_by_package_name: bool,
) -> Option<String> {
    if import_path.is_empty() {
        return None;
    }
    if import_path.contains("//") {
        return Some("An import path must not contain \"//\"".to_string());
    }
    if import_path.ends_with('/') {
        return Some("An import path must not end with \"/\"".to_string());
    }
    if !prefixed_by_package_name && import_path.starts_with('/') {
        return Some(
            "An import path must not start with \"/\" unless prefixed by a package name"
                .to_string(),
        );
    }
    None
}

/// Whether `selector` is one of the reserved system selector names such as `instance`.
pub fn is_system_selector(selector: &str) -> bool {
    SYSTEM_SELECTORS.contains(&selector)
}

pub fn explain_if_invalid_unquoted_identifier(identifier: &str) -> Option<String> {
    if identifier.is_empty() {
        return Some("The identifier cannot be an empty string".to_string());
    }
    if IDENTIFIER_BAD_CHAR.is_match(identifier) {
        return Some("The identifier cannot non-word characters".to_string());
    }
    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        return Some("The identifier must not start with a number".to_string());
    }
    None
}

/// Like [`explain_if_invalid_unquoted_identifier`], but system selector names
/// must be quoted so `(static:instance)` is never ambiguous.
pub fn explain_if_invalid_unquoted_member_identifier(identifier: &str) -> Option<String> {
    if let Some(explanation) = explain_if_invalid_unquoted_identifier(identifier) {
        return Some(explanation);
    }
    if is_system_selector(identifier) {
        return Some(format!(
            "The identifier \"{}\" must be quoted because it is a TSDoc system selector name",
            identifier
        ));
    }
    None
}
