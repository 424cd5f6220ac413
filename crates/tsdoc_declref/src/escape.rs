//! Quoting helpers for components and module sources.
//!
//! Text that would not scan back as a single component (or module source)
//! is written as a JSON string literal.

use crate::error::DeclarationReferenceError;
use crate::scanner::{Scanner, TokenKind};

/// Whether `text` scans as exactly one component: a single string or text
/// token, or nothing at all.
pub fn is_well_formed_component_string(text: &str) -> bool {
    let mut scanner = Scanner::new(text);
    match scanner.scan() {
        TokenKind::String | TokenKind::Text => scanner.scan() == TokenKind::EofToken,
        kind => kind == TokenKind::EofToken,
    }
}

/// Quote `text` when it cannot be used as a bare component.
pub fn escape_component_string(text: &str) -> String {
    if text.is_empty() {
        return "\"\"".to_string();
    }
    if text.starts_with('[') || text.starts_with('"') || !is_well_formed_component_string(text) {
        return json_quote(text);
    }
    text.to_string()
}

pub fn unescape_component_string(text: &str) -> Result<String, DeclarationReferenceError> {
    if is_quoted(text) {
        return serde_json::from_str::<String>(text)
            .map_err(|_| DeclarationReferenceError::InvalidComponent(text.to_string()));
    }
    if !is_well_formed_component_string(text) {
        return Err(DeclarationReferenceError::InvalidComponent(text.to_string()));
    }
    Ok(text.to_string())
}

/// Whether `text` followed by `!` scans as a complete module source.
pub fn is_well_formed_module_source_string(text: &str) -> bool {
    let terminated = format!("{}!", text);
    let mut scanner = Scanner::new(&terminated);
    scanner.rescan_module_source() == TokenKind::ModuleSource
        && !scanner.string_is_unterminated()
        && scanner.scan() == TokenKind::ExclamationToken
        && scanner.scan() == TokenKind::EofToken
}

/// Quote `text` when it cannot be used as a bare module source.
pub fn escape_module_source_string(text: &str) -> String {
    if text.is_empty() {
        return "\"\"".to_string();
    }
    if text.starts_with('"') || !is_well_formed_module_source_string(text) {
        return json_quote(text);
    }
    text.to_string()
}

pub fn unescape_module_source_string(text: &str) -> Result<String, DeclarationReferenceError> {
    if is_quoted(text) {
        return serde_json::from_str::<String>(text)
            .map_err(|_| DeclarationReferenceError::InvalidModuleSource(text.to_string()));
    }
    if !is_well_formed_module_source_string(text) {
        return Err(DeclarationReferenceError::InvalidModuleSource(text.to_string()));
    }
    Ok(text.to_string())
}

fn is_quoted(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}

fn json_quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_escaping() {
        assert_eq!(escape_component_string("Foo"), "Foo");
        assert_eq!(escape_component_string(""), "\"\"");
        assert_eq!(escape_component_string("a.b"), "\"a.b\"");
        assert_eq!(escape_component_string("[x]"), "\"[x]\"");
        assert_eq!(escape_component_string("say \"hi\""), r#""say \"hi\"""#);
    }

    #[test]
    fn test_component_unescaping() {
        assert_eq!(unescape_component_string("\"a.b\"").unwrap(), "a.b");
        assert_eq!(unescape_component_string("Foo").unwrap(), "Foo");
        assert!(unescape_component_string("a.b").is_err());
        assert!(unescape_component_string(r#""\x41""#).is_err());
    }

    #[test]
    fn test_well_formed_component() {
        assert!(is_well_formed_component_string("Foo"));
        assert!(is_well_formed_component_string("\"a b\""));
        assert!(is_well_formed_component_string(""));
        assert!(!is_well_formed_component_string("a#b"));
    }

    #[test]
    fn test_module_source_escaping() {
        assert!(is_well_formed_module_source_string("@scope/pkg/lib"));
        assert!(!is_well_formed_module_source_string("a!b"));
        assert_eq!(escape_module_source_string("pkg/lib"), "pkg/lib");
        assert_eq!(escape_module_source_string("a!b"), "\"a!b\"");
        assert_eq!(unescape_module_source_string("\"a!b\"").unwrap(), "a!b");
        assert!(unescape_module_source_string("a!b").is_err());
    }
}
