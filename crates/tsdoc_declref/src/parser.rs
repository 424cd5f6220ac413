//! Recursive descent parser for declaration references.
//!
//! The parser never stops at the first problem. Each failure records a
//! message and substitutes a fallback value, so the caller sees every error
//! at once.

use crate::component::{Component, ComponentPath, ComponentReference, ComponentString};
use crate::reference::{DeclarationReference, Meaning, ModuleSource, Navigation, Source, SymbolReference};
use crate::scanner::{Scanner, TokenKind};

/// Deepest `[...]` nesting parsed before the rest of a component is skipped.
const MAX_REFERENCE_DEPTH: u32 = 64;

pub(crate) struct Parser<'a> {
    scanner: Scanner<'a>,
    errors: Vec<String>,
    depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut scanner = Scanner::new(text);
        scanner.scan();
        Self {
            scanner,
            errors: Vec::new(),
            depth: 0,
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Whether every token was consumed.
    pub fn is_at_end(&self) -> bool {
        self.scanner.token() == TokenKind::EofToken
    }

    // ========================================================================
    // Grammar
    // ========================================================================

    pub fn parse_declaration_reference(&mut self) -> DeclarationReference {
        let mut source = None;
        let mut navigation = None;

        // (moduleSource `!` `~`? | `!`)?
        if self.optional_token(TokenKind::ExclamationToken) {
            source = Some(Source::Global);
        } else if self.scanner.rescan_module_source() == TokenKind::ModuleSource {
            source = Some(Source::Module(self.parse_module_source()));
            if self.optional_token(TokenKind::TildeToken) {
                navigation = Some(Navigation::Locals);
            }
        }

        let symbol = if self.is_start_of_component() {
            Some(self.parse_symbol())
        } else if self.scanner.token() == TokenKind::ColonToken {
            let root = ComponentPath::Root(ComponentString::parsed(String::new()).into());
            Some(self.parse_symbol_rest(root))
        } else {
            None
        };

        DeclarationReference::new(source, navigation, symbol)
    }

    fn parse_module_source(&mut self) -> ModuleSource {
        let text = self.scanner.token_text();
        self.expect_token(TokenKind::ModuleSource);
        self.expect_token(TokenKind::ExclamationToken);
        let (source, error) = ModuleSource::parsed(text);
        if let Some(error) = error {
            self.errors.push(error.to_string());
        }
        source
    }

    fn parse_symbol(&mut self) -> SymbolReference {
        let root = self.parse_root_component();
        let component_path = self.parse_component_rest(root);
        self.parse_symbol_rest(component_path)
    }

    fn parse_symbol_rest(&mut self, component_path: ComponentPath) -> SymbolReference {
        let mut meaning = None;
        let mut overload_index = None;
        if self.optional_token(TokenKind::ColonToken) {
            meaning = self.try_parse_meaning();
            overload_index = self.try_parse_overload_index(meaning.is_some());
        }
        SymbolReference::new(Some(component_path))
            .with_meaning(meaning)
            .with_overload_index(overload_index)
    }

    fn parse_root_component(&mut self) -> ComponentPath {
        if !self.is_start_of_component() {
            let fallback = ComponentPath::Root(ComponentString::parsed(String::new()).into());
            return self.fail("Component expected", fallback);
        }
        ComponentPath::Root(self.parse_component())
    }

    fn parse_component_rest(&mut self, mut component_path: ComponentPath) -> ComponentPath {
        loop {
            match self.scanner.token() {
                TokenKind::DotToken | TokenKind::HashToken | TokenKind::TildeToken => {
                    let navigation = self.parse_navigation();
                    let component = self.parse_component();
                    component_path = component_path.add_navigation_step(navigation, component);
                }
                _ => return component_path,
            }
        }
    }

    fn parse_navigation(&mut self) -> Navigation {
        let navigation = match self.scanner.token() {
            TokenKind::DotToken => Navigation::Exports,
            TokenKind::HashToken => Navigation::Members,
            TokenKind::TildeToken => Navigation::Locals,
            _ => return self.fail("Expected '.', '#', or '~'", Navigation::Exports),
        };
        self.scanner.scan();
        navigation
    }

    fn try_parse_meaning(&mut self) -> Option<Meaning> {
        let meaning = match self.scanner.rescan_meaning() {
            TokenKind::ClassKeyword => Meaning::Class,
            TokenKind::InterfaceKeyword => Meaning::Interface,
            TokenKind::TypeKeyword => Meaning::TypeAlias,
            TokenKind::EnumKeyword => Meaning::Enum,
            TokenKind::NamespaceKeyword => Meaning::Namespace,
            TokenKind::FunctionKeyword => Meaning::Function,
            TokenKind::VarKeyword => Meaning::Variable,
            TokenKind::ConstructorKeyword => Meaning::Constructor,
            TokenKind::MemberKeyword => Meaning::Member,
            TokenKind::EventKeyword => Meaning::Event,
            TokenKind::CallKeyword => Meaning::CallSignature,
            TokenKind::NewKeyword => Meaning::ConstructSignature,
            TokenKind::IndexKeyword => Meaning::IndexSignature,
            TokenKind::ComplexKeyword => Meaning::ComplexType,
            _ => return None,
        };
        self.scanner.scan();
        Some(meaning)
    }

    /// `(digits)`, or bare digits when no meaning was given.
    fn try_parse_overload_index(&mut self, has_meaning: bool) -> Option<u32> {
        if self.optional_token(TokenKind::OpenParenToken) {
            let overload_index = self.parse_decimal_digits();
            self.expect_token(TokenKind::CloseParenToken);
            return Some(overload_index);
        }
        if !has_meaning {
            return Some(self.parse_decimal_digits());
        }
        None
    }

    fn parse_decimal_digits(&mut self) -> u32 {
        if self.scanner.rescan_decimal_digits() != TokenKind::DecimalDigits {
            return self.fail("Decimal digit expected", 0);
        }
        let value = self.scanner.token_text().parse::<u32>();
        self.scanner.scan();
        match value {
            Ok(value) => value,
            Err(_) => self.fail("Overload index is out of range", 0),
        }
    }

    fn parse_component(&mut self) -> Component {
        match self.scanner.token() {
            TokenKind::OpenBracketToken => self.parse_bracketed_component(),
            TokenKind::String => {
                let text = self.parse_token_string(TokenKind::String, "String");
                ComponentString::parsed(text).into()
            }
            _ => ComponentString::parsed(self.parse_component_characters()).into(),
        }
    }

    fn parse_component_characters(&mut self) -> String {
        let mut text = String::new();
        while self.scanner.token() == TokenKind::Text {
            text.push_str(self.scanner.token_text());
            self.scanner.scan();
        }
        if text.is_empty() {
            return self.fail("Component expected", text);
        }
        text
    }

    fn parse_bracketed_component(&mut self) -> Component {
        if self.depth >= MAX_REFERENCE_DEPTH {
            self.skip_bracketed_component();
            let fallback = ComponentString::parsed(String::new()).into();
            return self.fail("Declaration reference is nested too deeply", fallback);
        }

        self.expect_token(TokenKind::OpenBracketToken);
        self.depth += 1;
        let reference = self.parse_declaration_reference();
        self.depth -= 1;
        self.expect_token(TokenKind::CloseBracketToken);
        ComponentReference::new(reference).into()
    }

    /// Consume tokens through the `]` matching the current `[`.
    fn skip_bracketed_component(&mut self) {
        let mut open_brackets = 0usize;
        loop {
            match self.scanner.token() {
                TokenKind::EofToken => return,
                TokenKind::OpenBracketToken => open_brackets += 1,
                TokenKind::CloseBracketToken => {
                    open_brackets -= 1;
                    if open_brackets == 0 {
                        self.scanner.scan();
                        return;
                    }
                }
                _ => {}
            }
            self.scanner.scan();
        }
    }

    fn parse_token_string(&mut self, token: TokenKind, name: &str) -> String {
        if self.scanner.token() != token {
            return self.fail(&format!("{} expected", name), String::new());
        }
        let text = self.scanner.token_text().to_string();
        let unterminated = self.scanner.string_is_unterminated();
        self.scanner.scan();
        if unterminated {
            return self.fail(&format!("{} is unterminated", name), text);
        }
        text
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn is_start_of_component(&self) -> bool {
        matches!(
            self.scanner.token(),
            TokenKind::Text | TokenKind::String | TokenKind::OpenBracketToken
        )
    }

    fn optional_token(&mut self, token: TokenKind) -> bool {
        if self.scanner.token() == token {
            self.scanner.scan();
            return true;
        }
        false
    }

    fn expect_token(&mut self, token: TokenKind) {
        let actual = self.scanner.token();
        if actual != token {
            let message = format!(
                "Expected token '{}', received '{}' instead.",
                token, actual
            );
            self.errors.push(message);
            return;
        }
        self.scanner.scan();
    }

    fn fail<T>(&mut self, message: &str, fallback: T) -> T {
        self.errors.push(message.to_string());
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> (DeclarationReference, Vec<String>, bool) {
        let mut parser = Parser::new(text);
        let reference = parser.parse_declaration_reference();
        let at_end = parser.is_at_end();
        (reference, parser.into_errors(), at_end)
    }

    #[test]
    fn test_parse_component_path() {
        let (reference, errors, at_end) = parse("Foo.bar#baz");
        assert!(errors.is_empty());
        assert!(at_end);
        assert!(reference.source().is_none());
        assert_eq!(reference.to_string(), "Foo.bar#baz");
    }

    #[test]
    fn test_parse_module_source_and_locals() {
        let (reference, errors, _) = parse("pkg!~Foo");
        assert!(errors.is_empty());
        assert_eq!(reference.navigation(), Some(Navigation::Locals));
        match reference.source() {
            Some(Source::Module(source)) => assert_eq!(source.path(), "pkg"),
            other => panic!("unexpected source {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_root_with_meaning() {
        let (reference, errors, _) = parse(":class");
        assert!(errors.is_empty());
        let symbol = reference.symbol().unwrap();
        assert_eq!(symbol.meaning, Some(Meaning::Class));
        assert_eq!(reference.to_string(), ":class");
    }

    #[test]
    fn test_missing_component_is_recorded() {
        let (_, errors, _) = parse("Foo.");
        assert_eq!(errors, vec!["Component expected".to_string()]);
    }

    #[test]
    fn test_unterminated_string_component() {
        let (_, errors, _) = parse("Foo.\"bar");
        assert_eq!(errors, vec!["String is unterminated".to_string()]);
    }

    #[test]
    fn test_missing_close_paren() {
        let (reference, errors, _) = parse("Foo:member(2");
        assert_eq!(
            errors,
            vec!["Expected token ')', received '<eof>' instead.".to_string()]
        );
        assert_eq!(reference.symbol().unwrap().overload_index, Some(2));
    }

    #[test]
    fn test_nesting_past_limit_is_skipped() {
        let depth = MAX_REFERENCE_DEPTH as usize + 1;
        let text = format!("{}a{}.b", "[".repeat(depth), "]".repeat(depth));
        let (reference, errors, at_end) = parse(&text);
        assert_eq!(errors, vec!["Declaration reference is nested too deeply".to_string()]);
        assert!(at_end);
        assert!(reference.to_string().ends_with(".b"));
    }

    #[test]
    fn test_bad_overload_index() {
        let (_, errors, _) = parse("Foo:bar");
        assert_eq!(errors, vec!["Decimal digit expected".to_string()]);
    }
}
