//! Registry of node kinds and the parent/child relationships they permit.

use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tsdoc_core::string_checks;

use crate::kind::DocNodeKind;

/// The package that owns the built-in node kinds.
pub const TSDOC_PACKAGE_NAME: &str = "@microsoft/tsdoc";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocNodeManagerError {
    #[error("Invalid package name {package_name:?}: {explanation}")]
    InvalidPackageName {
        package_name: String,
        explanation: String,
    },
    #[error("The DocNode kind {kind} was already registered by {package_name}")]
    DuplicateDefinition {
        kind: DocNodeKind,
        package_name: String,
    },
    #[error("The DocNode kind {kind} was not registered with this manager")]
    UndefinedKind { kind: DocNodeKind },
}

#[derive(Debug, Clone)]
pub struct DocNodeDefinition {
    pub kind: DocNodeKind,
    pub package_name: String,
}

/// Records which node kinds exist and which kinds each container accepts.
#[derive(Debug, Clone, Default)]
pub struct DocNodeManager {
    definitions: FxHashMap<DocNodeKind, DocNodeDefinition>,
    allowed_children: FxHashMap<DocNodeKind, FxHashSet<DocNodeKind>>,
}

static BUILTIN: Lazy<DocNodeManager> = Lazy::new(DocNodeManager::with_builtin_nodes);

impl DocNodeManager {
    /// An empty manager with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared manager with every built-in node kind registered.
    pub fn builtin() -> &'static DocNodeManager {
        &BUILTIN
    }

    /// A fresh manager with every built-in node kind registered.
    pub fn with_builtin_nodes() -> Self {
        let mut manager = Self::new();
        manager.register_builtin();
        manager
    }

    fn register_builtin(&mut self) {
        for &kind in DocNodeKind::ALL {
            self.definitions.insert(
                kind,
                DocNodeDefinition {
                    kind,
                    package_name: TSDOC_PACKAGE_NAME.to_string(),
                },
            );
        }
        self.allow(
            DocNodeKind::Section,
            &[
                DocNodeKind::FencedCode,
                DocNodeKind::Paragraph,
                DocNodeKind::HtmlStartTag,
                DocNodeKind::HtmlEndTag,
            ],
        );
        self.allow(
            DocNodeKind::Paragraph,
            &[
                DocNodeKind::BlockTag,
                DocNodeKind::CodeSpan,
                DocNodeKind::ErrorText,
                DocNodeKind::EscapedText,
                DocNodeKind::HtmlStartTag,
                DocNodeKind::HtmlEndTag,
                DocNodeKind::InlineTag,
                DocNodeKind::LinkTag,
                DocNodeKind::PlainText,
                DocNodeKind::SoftBreak,
            ],
        );
    }

    fn allow(&mut self, parent: DocNodeKind, children: &[DocNodeKind]) {
        self.allowed_children
            .entry(parent)
            .or_default()
            .extend(children.iter().copied());
    }

    /// Register node kinds on behalf of a package.
    pub fn register_doc_nodes(
        &mut self,
        package_name: &str,
        kinds: &[DocNodeKind],
    ) -> Result<(), DocNodeManagerError> {
        if let Some(explanation) = string_checks::explain_if_invalid_package_name(package_name) {
            return Err(DocNodeManagerError::InvalidPackageName {
                package_name: package_name.to_string(),
                explanation,
            });
        }
        for &kind in kinds {
            if let Some(existing) = self.definitions.get(&kind) {
                return Err(DocNodeManagerError::DuplicateDefinition {
                    kind,
                    package_name: existing.package_name.clone(),
                });
            }
            self.definitions.insert(
                kind,
                DocNodeDefinition {
                    kind,
                    package_name: package_name.to_string(),
                },
            );
        }
        Ok(())
    }

    /// Permit `children` to be appended to containers of kind `parent`.
    pub fn register_allowable_children(
        &mut self,
        parent: DocNodeKind,
        children: &[DocNodeKind],
    ) -> Result<(), DocNodeManagerError> {
        for &kind in std::iter::once(&parent).chain(children) {
            if !self.definitions.contains_key(&kind) {
                return Err(DocNodeManagerError::UndefinedKind { kind });
            }
        }
        self.allow(parent, children);
        Ok(())
    }

    pub fn is_allowed_child(&self, parent: DocNodeKind, child: DocNodeKind) -> bool {
        self.allowed_children
            .get(&parent)
            .is_some_and(|children| children.contains(&child))
    }

    pub fn try_get_definition(&self, kind: DocNodeKind) -> Option<&DocNodeDefinition> {
        self.definitions.get(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_children() {
        let manager = DocNodeManager::builtin();
        assert!(manager.is_allowed_child(DocNodeKind::Section, DocNodeKind::Paragraph));
        assert!(manager.is_allowed_child(DocNodeKind::Paragraph, DocNodeKind::SoftBreak));
        assert!(!manager.is_allowed_child(DocNodeKind::Paragraph, DocNodeKind::FencedCode));
        assert!(!manager.is_allowed_child(DocNodeKind::Section, DocNodeKind::PlainText));
        assert_eq!(
            manager
                .try_get_definition(DocNodeKind::LinkTag)
                .map(|d| d.package_name.as_str()),
            Some(TSDOC_PACKAGE_NAME)
        );
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut manager = DocNodeManager::with_builtin_nodes();
        let result = manager.register_doc_nodes("my-package", &[DocNodeKind::PlainText]);
        assert!(matches!(
            result,
            Err(DocNodeManagerError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_invalid_package_name() {
        let mut manager = DocNodeManager::new();
        let result = manager.register_doc_nodes("bad name", &[DocNodeKind::PlainText]);
        assert!(matches!(
            result,
            Err(DocNodeManagerError::InvalidPackageName { .. })
        ));
    }

    #[test]
    fn test_children_require_registration() {
        let mut manager = DocNodeManager::new();
        let result =
            manager.register_allowable_children(DocNodeKind::Section, &[DocNodeKind::Paragraph]);
        assert_eq!(
            result,
            Err(DocNodeManagerError::UndefinedKind {
                kind: DocNodeKind::Section
            })
        );

        manager
            .register_doc_nodes("my-package", &[DocNodeKind::Section, DocNodeKind::Paragraph])
            .unwrap();
        manager
            .register_allowable_children(DocNodeKind::Section, &[DocNodeKind::Paragraph])
            .unwrap();
        assert!(manager.is_allowed_child(DocNodeKind::Section, DocNodeKind::Paragraph));
    }
}
