use pretty_assertions::assert_eq;
use tsdoc_declref::{
    Component, ComponentPath, DeclarationReference, DeclarationReferenceError, Meaning,
    Navigation, Source,
};

fn parse(text: &str) -> DeclarationReference {
    DeclarationReference::parse(text).unwrap_or_else(|e| panic!("{}", e))
}

fn module_path(reference: &DeclarationReference) -> &str {
    match reference.source() {
        Some(Source::Module(source)) => source.path(),
        other => panic!("expected a module source, got {:?}", other),
    }
}

fn last_component(reference: &DeclarationReference) -> String {
    reference
        .symbol()
        .and_then(|symbol| symbol.component_path.as_ref())
        .map(|path| path.component().to_string())
        .unwrap_or_default()
}

// ============================================================================
// Normalized round trips
// ============================================================================

#[test]
fn test_round_trips() {
    for text in [
        "Foo",
        "Foo.bar",
        "Foo#bar",
        "Foo~bar",
        "pkg!Foo",
        "pkg!~Foo",
        "@scope/pkg/lib/index!Foo.bar",
        "!Array",
        "Foo:class",
        "Foo#bar:member(1)",
        "Foo#bar:1",
        "Foo.\"a b\"",
        "\"my pkg\"!Foo",
        "Foo.[Symbol.iterator]",
        "Foo#[Symbol.iterator]:member",
        "pkg!",
    ] {
        assert_eq!(parse(text).to_string(), text);
    }
}

#[test]
fn test_parenthesized_index_without_meaning_normalizes() {
    assert_eq!(parse("Foo:(2)").to_string(), "Foo:2");
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_source_kinds() {
    let reference = parse("@scope/pkg/lib!Foo");
    assert_eq!(module_path(&reference), "@scope/pkg/lib");
    match reference.source() {
        Some(Source::Module(source)) => {
            assert_eq!(source.package_name(), "@scope/pkg");
            assert_eq!(source.import_path(), "lib");
        }
        _ => unreachable!(),
    }
    assert_eq!(reference.navigation(), Some(Navigation::Exports));

    let global = parse("!Foo");
    assert_eq!(global.source(), Some(&Source::Global));
    assert_eq!(global.navigation(), Some(Navigation::Locals));

    let bare = parse("Foo");
    assert!(bare.source().is_none());
    assert_eq!(bare.navigation(), None);
}

#[test]
fn test_quoted_module_source_is_unescaped() {
    let reference = parse(r#""a!b"!Foo"#);
    assert_eq!(module_path(&reference), "a!b");
    assert_eq!(reference.to_string(), r#""a!b"!Foo"#);
}

#[test]
fn test_meanings_and_overloads() {
    let cases = [
        ("Foo:class", Some(Meaning::Class), None),
        ("Foo:type", Some(Meaning::TypeAlias), None),
        ("Foo:var", Some(Meaning::Variable), None),
        ("Foo:new(0)", Some(Meaning::ConstructSignature), Some(0)),
        ("Foo:complex", Some(Meaning::ComplexType), None),
        ("Foo:3", None, Some(3)),
    ];
    for (text, meaning, overload_index) in cases {
        let reference = parse(text);
        let symbol = reference.symbol().unwrap();
        assert_eq!(symbol.meaning, meaning, "{text}");
        assert_eq!(symbol.overload_index, overload_index, "{text}");
    }
}

#[test]
fn test_bracketed_component() {
    let reference = parse("Foo.[Symbol.iterator]");
    let Some(ComponentPath::Navigation { component, .. }) =
        reference.symbol().and_then(|s| s.component_path.as_ref())
    else {
        panic!("expected a navigation step");
    };
    let Component::Reference(inner) = component else {
        panic!("expected a bracketed component");
    };
    assert_eq!(inner.reference().to_string(), "Symbol.iterator");
    assert_eq!(last_component(&reference), "[Symbol.iterator]");
}

#[test]
fn test_empty_reference() {
    let reference = parse("");
    assert!(reference.is_empty());
    assert_eq!(reference.to_string(), "");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_errors_are_aggregated() {
    let error = DeclarationReference::parse("Foo.:member(x").unwrap_err();
    let DeclarationReferenceError::Syntax { errors, .. } = &error else {
        panic!("expected a syntax error, got {:?}", error);
    };
    assert_eq!(
        errors,
        &vec![
            "Component expected".to_string(),
            "Decimal digit expected".to_string(),
            "Expected token ')', received '<text>' instead.".to_string(),
        ]
    );
    assert!(error
        .to_string()
        .starts_with("Invalid DeclarationReference 'Foo.:member(x':\n  Component expected"));
}

#[test]
fn test_trailing_input() {
    assert_eq!(
        DeclarationReference::parse("Foo)"),
        Err(DeclarationReferenceError::TrailingInput {
            text: "Foo)".to_string()
        })
    );
}

#[test]
fn test_unterminated_string() {
    let error = DeclarationReference::parse("Foo.\"bar").unwrap_err();
    assert!(error.to_string().contains("String is unterminated"));
}

#[test]
fn test_missing_close_bracket() {
    let error = DeclarationReference::parse("Foo.[Bar").unwrap_err();
    assert!(error
        .to_string()
        .contains("Expected token ']', received '<eof>' instead."));
}

#[test]
fn test_deep_nesting_is_an_error() {
    let text = format!("{}a{}", "[".repeat(1000), "]".repeat(1000));
    let error = DeclarationReference::parse(&text).unwrap_err();
    let DeclarationReferenceError::Syntax { errors, .. } = &error else {
        panic!("expected a syntax error, got {:?}", error);
    };
    assert_eq!(errors, &vec!["Declaration reference is nested too deeply".to_string()]);
}

#[test]
fn test_nesting_within_limit_round_trips() {
    let text = format!("{}a{}", "[".repeat(32), "]".repeat(32));
    assert_eq!(parse(&text).to_string(), text);
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn test_parse_component() {
    assert_eq!(
        DeclarationReference::parse_component("Foo").unwrap().to_string(),
        "Foo"
    );
    assert_eq!(
        DeclarationReference::parse_component("[Symbol.iterator]")
            .unwrap()
            .to_string(),
        "[Symbol.iterator]"
    );
    assert!(matches!(
        DeclarationReference::parse_component("a.b"),
        Err(DeclarationReferenceError::InvalidComponent(_))
    ));
}

#[test]
fn test_builder_matches_parsed() {
    let built = DeclarationReference::package("@scope/pkg", Some("lib"))
        .unwrap()
        .add_navigation_step(Navigation::Exports, "Widget")
        .unwrap()
        .add_navigation_step(Navigation::Members, "render")
        .unwrap()
        .with_meaning(Some(Meaning::Member))
        .with_overload_index(Some(0));
    assert_eq!(built.to_string(), "@scope/pkg/lib!Widget#render:member(0)");
    let parsed = parse("@scope/pkg/lib!Widget#render:member(0)")
        .with_navigation(Some(Navigation::Exports));
    assert_eq!(built, parsed);
}
