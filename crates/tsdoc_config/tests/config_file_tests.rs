//! Tests for loading `tsdoc.json` and applying it to a configuration.

use pretty_assertions::assert_eq;
use tsdoc_config::{
    ConfigurationError, TSDocConfigFile, TSDocConfiguration, TSDocTagSyntaxKind,
};

fn configure(json: &str) -> Result<TSDocConfiguration, ConfigurationError> {
    let file = TSDocConfigFile::from_json(json)?;
    let mut configuration = TSDocConfiguration::new();
    file.configure(&mut configuration)?;
    Ok(configuration)
}

// ============================================================================
// Tag definitions
// ============================================================================

#[test]
fn test_custom_tags_are_defined() {
    let configuration = configure(
        r#"{
            "tagDefinitions": [
                { "tagName": "@myBlock", "syntaxKind": "block", "allowMultiple": true },
                { "tagName": "@myFlag", "syntaxKind": "modifier" }
            ]
        }"#,
    )
    .unwrap();

    let block = configuration.try_get_tag_definition("@myblock").unwrap();
    assert_eq!(block.syntax_kind(), TSDocTagSyntaxKind::Block);
    assert!(block.allow_multiple());

    let flag = configuration.try_get_tag_definition("@myFlag").unwrap();
    assert_eq!(flag.syntax_kind(), TSDocTagSyntaxKind::Modifier);
    assert!(!flag.allow_multiple());
    assert!(configuration.try_get_tag_definition("@remarks").is_some());
}

#[test]
fn test_no_standard_tags() {
    let configuration = configure(
        r#"{
            "noStandardTags": true,
            "tagDefinitions": [{ "tagName": "@only", "syntaxKind": "inline" }]
        }"#,
    )
    .unwrap();
    let names: Vec<_> = configuration
        .tag_definitions()
        .map(|d| d.tag_name().to_string())
        .collect();
    assert_eq!(names, vec!["@only".to_string()]);
}

#[test]
fn test_invalid_tag_name_is_an_error() {
    let result = configure(r#"{ "tagDefinitions": [{ "tagName": "nope", "syntaxKind": "block" }] }"#);
    assert!(matches!(result, Err(ConfigurationError::InvalidTagName { .. })));
}

#[test]
fn test_unknown_syntax_kind_is_a_json_error() {
    let result = configure(r#"{ "tagDefinitions": [{ "tagName": "@x", "syntaxKind": "weird" }] }"#);
    assert!(matches!(result, Err(ConfigurationError::Json(_))));
}

// ============================================================================
// Support and HTML settings
// ============================================================================

#[test]
fn test_support_for_tags() {
    let configuration = configure(r#"{ "supportForTags": { "@beta": false, "@remarks": true } }"#)
        .unwrap();
    assert!(configuration.validation().report_unsupported_tags);
    let beta = configuration.try_get_tag_definition("@beta").unwrap();
    assert!(!configuration.is_tag_supported(beta));
}

#[test]
fn test_support_for_undefined_tag_fails() {
    let result = configure(r#"{ "supportForTags": { "@nothing": true } }"#);
    assert!(matches!(result, Err(ConfigurationError::TagNotDefined { .. })));
}

#[test]
fn test_html_settings() {
    let configuration = configure(
        r#"{ "supportedHtmlElements": ["b", "i"], "reportUnsupportedHtmlElements": false }"#,
    )
    .unwrap();
    assert!(configuration.is_html_element_supported("i"));
    assert!(!configuration.validation().report_unsupported_html_elements);
}

#[test]
fn test_missing_file() {
    let result = TSDocConfigFile::load("/definitely/not/here/tsdoc.json");
    assert!(matches!(result, Err(ConfigurationError::Io { .. })));
}
