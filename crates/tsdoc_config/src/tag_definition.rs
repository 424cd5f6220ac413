//! Tag definitions.

use serde::{Deserialize, Serialize};
use tsdoc_core::string_checks;

use crate::error::ConfigurationError;

/// How a tag is written and what it applies to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TSDocTagSyntaxKind {
    /// Written inside braces, e.g. `{@link}`.
    Inline,
    /// Starts a block of content, e.g. `@remarks`.
    Block,
    /// Carries no content, e.g. `@beta`.
    Modifier,
}

/// How widely a tag is supported across documentation tools.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Standardization {
    /// Every tool is expected to support it.
    Core,
    /// Optional, but with a standard meaning.
    Extended,
    /// Standard syntax, implementation-defined meaning.
    Discretionary,
    /// Not a standard tag.
    None,
}

/// The definition of one tag in a [`TSDocConfiguration`](crate::TSDocConfiguration).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TSDocTagDefinition {
    tag_name: String,
    tag_name_with_upper_case: String,
    syntax_kind: TSDocTagSyntaxKind,
    allow_multiple: bool,
    standardization: Standardization,
}

impl TSDocTagDefinition {
    /// Define a custom tag. `tag_name` includes the `@`.
    pub fn new(
        tag_name: impl Into<String>,
        syntax_kind: TSDocTagSyntaxKind,
        allow_multiple: bool,
    ) -> Result<Self, ConfigurationError> {
        let tag_name = tag_name.into();
        if let Some(explanation) = string_checks::explain_if_invalid_tsdoc_tag_name(&tag_name) {
            return Err(ConfigurationError::InvalidTagName {
                tag_name,
                explanation,
            });
        }
        Ok(Self::with_standardization(
            tag_name,
            syntax_kind,
            allow_multiple,
            Standardization::None,
        ))
    }

    pub(crate) fn with_standardization(
        tag_name: impl Into<String>,
        syntax_kind: TSDocTagSyntaxKind,
        allow_multiple: bool,
        standardization: Standardization,
    ) -> Self {
        let tag_name = tag_name.into();
        Self {
            tag_name_with_upper_case: tag_name.to_uppercase(),
            tag_name,
            syntax_kind,
            allow_multiple,
            standardization,
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn tag_name_with_upper_case(&self) -> &str {
        &self.tag_name_with_upper_case
    }

    pub fn syntax_kind(&self) -> TSDocTagSyntaxKind {
        self.syntax_kind
    }

    /// Whether the tag may appear more than once in one comment.
    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    pub fn standardization(&self) -> Standardization {
        self.standardization
    }
}
