//! Declaration references, as used by `{@link}` and `{@inheritDoc}`.
//!
//! A reference looks like `package/path#Class.member:selector`. The package
//! and import path are optional; the member chain is made of
//! [`DocMemberReference`]s that name either an identifier or a symbol.

use tsdoc_core::string_checks;
use tsdoc_scanner::TokenSequence;

use crate::excerpt::{DocExcerpt, ExcerptKind, NodeText};

// ============================================================================
// DocDeclarationReference
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct DocDeclarationReference<'a> {
    package_name: Option<NodeText<'a>>,
    import_path: Option<NodeText<'a>>,
    import_hash: Option<DocExcerpt<'a>>,
    spacing_after_import_hash: Option<DocExcerpt<'a>>,
    member_references: Vec<DocMemberReference<'a>>,
}

impl<'a> DocDeclarationReference<'a> {
    pub fn new(
        package_name: Option<String>,
        import_path: Option<String>,
        member_references: Vec<DocMemberReference<'a>>,
    ) -> Self {
        Self {
            package_name: package_name.map(NodeText::raw),
            import_path: import_path.map(NodeText::raw),
            import_hash: None,
            spacing_after_import_hash: None,
            member_references,
        }
    }

    pub fn parsed(
        package_name: Option<TokenSequence<'a>>,
        import_path: Option<TokenSequence<'a>>,
        import_hash: Option<TokenSequence<'a>>,
        spacing_after_import_hash: Option<TokenSequence<'a>>,
        member_references: Vec<DocMemberReference<'a>>,
    ) -> Self {
        Self {
            package_name: package_name
                .filter(|s| !s.is_empty())
                .map(|s| NodeText::parsed(ExcerptKind::DeclarationReferencePackageName, s)),
            import_path: import_path
                .filter(|s| !s.is_empty())
                .map(|s| NodeText::parsed(ExcerptKind::DeclarationReferenceImportPath, s)),
            import_hash: DocExcerpt::maybe(ExcerptKind::DeclarationReferenceImportHash, import_hash),
            spacing_after_import_hash: DocExcerpt::maybe(
                ExcerptKind::Spacing,
                spacing_after_import_hash,
            ),
            member_references,
        }
    }

    /// e.g. `@scope/my-package`.
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_ref().map(NodeText::as_str)
    }

    /// e.g. `/path1/path2`.
    pub fn import_path(&self) -> Option<&str> {
        self.import_path.as_ref().map(NodeText::as_str)
    }

    pub fn member_references(&self) -> &[DocMemberReference<'a>] {
        &self.member_references
    }

    pub(crate) fn leading_excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.package_name.as_ref().and_then(NodeText::excerpt),
            self.import_path.as_ref().and_then(NodeText::excerpt),
            self.import_hash.as_ref(),
            self.spacing_after_import_hash.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// ============================================================================
// DocMemberReference
// ============================================================================

/// Punctuation and spacing captured around one member of a reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberReferenceExcerpts<'a> {
    pub dot: Option<TokenSequence<'a>>,
    pub spacing_after_dot: Option<TokenSequence<'a>>,
    pub left_parenthesis: Option<TokenSequence<'a>>,
    pub spacing_after_left_parenthesis: Option<TokenSequence<'a>>,
    pub spacing_after_member: Option<TokenSequence<'a>>,
    pub colon: Option<TokenSequence<'a>>,
    pub spacing_after_colon: Option<TokenSequence<'a>>,
    pub spacing_after_selector: Option<TokenSequence<'a>>,
    pub right_parenthesis: Option<TokenSequence<'a>>,
    pub spacing_after_right_parenthesis: Option<TokenSequence<'a>>,
}

#[derive(Debug, Clone, Default)]
struct MemberReferenceDocExcerpts<'a> {
    dot: Option<DocExcerpt<'a>>,
    spacing_after_dot: Option<DocExcerpt<'a>>,
    left_parenthesis: Option<DocExcerpt<'a>>,
    spacing_after_left_parenthesis: Option<DocExcerpt<'a>>,
    spacing_after_member: Option<DocExcerpt<'a>>,
    colon: Option<DocExcerpt<'a>>,
    spacing_after_colon: Option<DocExcerpt<'a>>,
    spacing_after_selector: Option<DocExcerpt<'a>>,
    right_parenthesis: Option<DocExcerpt<'a>>,
    spacing_after_right_parenthesis: Option<DocExcerpt<'a>>,
}

/// One step of a member chain, e.g. `.(myMethod:instance)`.
#[derive(Debug, Clone)]
pub struct DocMemberReference<'a> {
    has_dot: bool,
    member_identifier: Option<DocMemberIdentifier<'a>>,
    member_symbol: Option<Box<DocMemberSymbol<'a>>>,
    selector: Option<DocMemberSelector<'a>>,
    excerpts: MemberReferenceDocExcerpts<'a>,
}

impl<'a> DocMemberReference<'a> {
    /// Panics if both an identifier and a symbol are given.
    pub fn new(
        has_dot: bool,
        member_identifier: Option<DocMemberIdentifier<'a>>,
        member_symbol: Option<DocMemberSymbol<'a>>,
        selector: Option<DocMemberSelector<'a>>,
    ) -> Self {
        assert!(
            member_identifier.is_none() || member_symbol.is_none(),
            "A DocMemberReference cannot have both an identifier and a symbol"
        );
        Self {
            has_dot,
            member_identifier,
            member_symbol: member_symbol.map(Box::new),
            selector,
            excerpts: MemberReferenceDocExcerpts::default(),
        }
    }

    pub fn parsed(
        member_identifier: Option<DocMemberIdentifier<'a>>,
        member_symbol: Option<DocMemberSymbol<'a>>,
        selector: Option<DocMemberSelector<'a>>,
        excerpts: MemberReferenceExcerpts<'a>,
    ) -> Self {
        let spacing = |s| DocExcerpt::maybe(ExcerptKind::Spacing, s);
        Self {
            has_dot: excerpts.dot.is_some(),
            member_identifier,
            member_symbol: member_symbol.map(Box::new),
            selector,
            excerpts: MemberReferenceDocExcerpts {
                dot: DocExcerpt::maybe(ExcerptKind::MemberReferenceDot, excerpts.dot),
                spacing_after_dot: spacing(excerpts.spacing_after_dot),
                left_parenthesis: DocExcerpt::maybe(
                    ExcerptKind::MemberReferenceLeftParenthesis,
                    excerpts.left_parenthesis,
                ),
                spacing_after_left_parenthesis: spacing(excerpts.spacing_after_left_parenthesis),
                spacing_after_member: spacing(excerpts.spacing_after_member),
                colon: DocExcerpt::maybe(ExcerptKind::MemberReferenceColon, excerpts.colon),
                spacing_after_colon: spacing(excerpts.spacing_after_colon),
                spacing_after_selector: spacing(excerpts.spacing_after_selector),
                right_parenthesis: DocExcerpt::maybe(
                    ExcerptKind::MemberReferenceRightParenthesis,
                    excerpts.right_parenthesis,
                ),
                spacing_after_right_parenthesis: spacing(excerpts.spacing_after_right_parenthesis),
            },
        }
    }

    /// True when the member is preceded by `.`.
    pub fn has_dot(&self) -> bool {
        self.has_dot
    }

    pub fn member_identifier(&self) -> Option<&DocMemberIdentifier<'a>> {
        self.member_identifier.as_ref()
    }

    pub fn member_symbol(&self) -> Option<&DocMemberSymbol<'a>> {
        self.member_symbol.as_deref()
    }

    pub fn selector(&self) -> Option<&DocMemberSelector<'a>> {
        self.selector.as_ref()
    }

    pub(crate) fn leading_excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        let e = &self.excerpts;
        [
            e.dot.as_ref(),
            e.spacing_after_dot.as_ref(),
            e.left_parenthesis.as_ref(),
            e.spacing_after_left_parenthesis.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub(crate) fn middle_excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        let e = &self.excerpts;
        [
            e.spacing_after_member.as_ref(),
            e.colon.as_ref(),
            e.spacing_after_colon.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub(crate) fn trailing_excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        let e = &self.excerpts;
        [
            e.spacing_after_selector.as_ref(),
            e.right_parenthesis.as_ref(),
            e.spacing_after_right_parenthesis.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// ============================================================================
// DocMemberIdentifier
// ============================================================================

/// A member name, quoted when it is not a valid unquoted identifier.
#[derive(Debug, Clone)]
pub struct DocMemberIdentifier<'a> {
    left_quote: Option<DocExcerpt<'a>>,
    identifier: NodeText<'a>,
    right_quote: Option<DocExcerpt<'a>>,
    has_quotes: bool,
}

impl<'a> DocMemberIdentifier<'a> {
    /// Quotes are added on output when `identifier` needs them.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let has_quotes = !Self::is_valid_identifier(&identifier);
        Self {
            left_quote: None,
            identifier: NodeText::raw(identifier),
            right_quote: None,
            has_quotes,
        }
    }

    pub fn parsed(
        left_quote: Option<TokenSequence<'a>>,
        identifier: TokenSequence<'a>,
        right_quote: Option<TokenSequence<'a>>,
    ) -> Self {
        Self {
            has_quotes: left_quote.is_some(),
            left_quote: DocExcerpt::maybe(ExcerptKind::MemberIdentifierLeftQuote, left_quote),
            identifier: NodeText::parsed(ExcerptKind::MemberIdentifierIdentifier, identifier),
            right_quote: DocExcerpt::maybe(ExcerptKind::MemberIdentifierRightQuote, right_quote),
        }
    }

    /// Whether `identifier` can be written without quotes.
    pub fn is_valid_identifier(identifier: &str) -> bool {
        string_checks::explain_if_invalid_unquoted_member_identifier(identifier).is_none()
    }

    /// The identifier without quotes.
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    pub fn has_quotes(&self) -> bool {
        self.has_quotes
    }

    pub(crate) fn excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.left_quote.as_ref(),
            self.identifier.excerpt(),
            self.right_quote.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// ============================================================================
// DocMemberSymbol
// ============================================================================

/// A symbol member such as `[WellknownSymbols.toStringTag]`.
#[derive(Debug, Clone)]
pub struct DocMemberSymbol<'a> {
    left_bracket: Option<DocExcerpt<'a>>,
    spacing_after_left_bracket: Option<DocExcerpt<'a>>,
    symbol_reference: DocDeclarationReference<'a>,
    right_bracket: Option<DocExcerpt<'a>>,
}

impl<'a> DocMemberSymbol<'a> {
    pub fn new(symbol_reference: DocDeclarationReference<'a>) -> Self {
        Self {
            left_bracket: None,
            spacing_after_left_bracket: None,
            symbol_reference,
            right_bracket: None,
        }
    }

    pub fn parsed(
        left_bracket: TokenSequence<'a>,
        spacing_after_left_bracket: Option<TokenSequence<'a>>,
        symbol_reference: DocDeclarationReference<'a>,
        right_bracket: TokenSequence<'a>,
    ) -> Self {
        Self {
            left_bracket: Some(DocExcerpt::new(
                ExcerptKind::MemberSymbolLeftBracket,
                left_bracket,
            )),
            spacing_after_left_bracket: DocExcerpt::maybe(
                ExcerptKind::Spacing,
                spacing_after_left_bracket,
            ),
            symbol_reference,
            right_bracket: Some(DocExcerpt::new(
                ExcerptKind::MemberSymbolRightBracket,
                right_bracket,
            )),
        }
    }

    pub fn symbol_reference(&self) -> &DocDeclarationReference<'a> {
        &self.symbol_reference
    }

    pub(crate) fn leading_excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.left_bracket.as_ref(),
            self.spacing_after_left_bracket.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub(crate) fn right_bracket(&self) -> Option<&DocExcerpt<'a>> {
        self.right_bracket.as_ref()
    }
}

// ============================================================================
// DocMemberSelector
// ============================================================================

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SelectorKind {
    /// A reserved name such as `instance` or `static`.
    System,
    /// A `{@label}` name in upper case, e.g. `WITH_NUMBERS`.
    Label,
    /// A positive integer overload index.
    Index,
    /// The selector could not be classified; see [`DocMemberSelector::error_message`].
    Error,
}

#[derive(Debug, Clone)]
pub struct DocMemberSelector<'a> {
    selector: NodeText<'a>,
    selector_kind: SelectorKind,
    error_message: Option<String>,
}

impl<'a> DocMemberSelector<'a> {
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_text(NodeText::raw(selector))
    }

    pub fn parsed(selector: TokenSequence<'a>) -> Self {
        Self::from_text(NodeText::parsed(ExcerptKind::MemberSelector, selector))
    }

    fn from_text(selector: NodeText<'a>) -> Self {
        let (selector_kind, error_message) = classify_selector(selector.as_str());
        Self {
            selector,
            selector_kind,
            error_message,
        }
    }

    pub fn selector(&self) -> &str {
        self.selector.as_str()
    }

    pub fn selector_kind(&self) -> SelectorKind {
        self.selector_kind
    }

    /// Set when the kind is [`SelectorKind::Error`].
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub(crate) fn excerpt(&self) -> Option<&DocExcerpt<'a>> {
        self.selector.excerpt()
    }
}

fn classify_selector(selector: &str) -> (SelectorKind, Option<String>) {
    let first = selector.chars().next();
    match first {
        Some(c) if c.is_ascii_digit() => {
            if selector.chars().all(|c| c.is_ascii_digit()) {
                (SelectorKind::Index, None)
            } else {
                (
                    SelectorKind::Error,
                    Some(
                        "If the selector begins with a number, it must be a positive integer value"
                            .to_string(),
                    ),
                )
            }
        }
        Some(c) if c.is_ascii_lowercase() => {
            if string_checks::is_system_selector(selector) {
                (SelectorKind::System, None)
            } else {
                (
                    SelectorKind::Error,
                    Some(format!(
                        "The selector {:?} is not a recognized TSDoc system selector name",
                        selector
                    )),
                )
            }
        }
        Some(c) if c.is_ascii_uppercase() || c == '_' => {
            let well_formed = selector.len() > 1
                && selector
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
            if well_formed {
                (SelectorKind::Label, None)
            } else {
                (
                    SelectorKind::Error,
                    Some(
                        "A label selector must be comprised of upper case letters, numbers, \
                         and underscores and must not start with a number"
                            .to_string(),
                    ),
                )
            }
        }
        _ => (
            SelectorKind::Error,
            Some("The selector cannot be an empty string".to_string()),
        ),
    }
}
