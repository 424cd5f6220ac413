//! The configuration a parse runs against.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tsdoc_ast::DocNodeManager;
use tsdoc_core::string_checks;
use tsdoc_diagnostics::TSDocMessageId;

use crate::error::ConfigurationError;
use crate::standard_tags::StandardTags;
use crate::tag_definition::TSDocTagDefinition;

/// Switches that control which configuration-level diagnostics are reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSDocValidationConfiguration {
    /// Suppress `tsdoc-undefined-tag`.
    pub ignore_undefined_tags: bool,
    /// Report `tsdoc-unsupported-tag` for defined tags that are not marked supported.
    pub report_unsupported_tags: bool,
    /// Report `tsdoc-unsupported-html-element-name` for elements outside the supported set.
    pub report_unsupported_html_elements: bool,
}

/// Tag definitions, validation switches, supported HTML elements, and the
/// node registry.
///
/// Mutate it before parsing; a parse only reads it.
#[derive(Debug, Clone)]
pub struct TSDocConfiguration {
    tag_definitions: IndexMap<String, TSDocTagDefinition>,
    supported_tags: IndexSet<String>,
    validation: TSDocValidationConfiguration,
    supported_html_elements: IndexSet<String>,
    doc_node_manager: DocNodeManager,
}

impl Default for TSDocConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl TSDocConfiguration {
    /// A configuration with every standard tag defined and supported.
    pub fn new() -> Self {
        let mut configuration = Self {
            tag_definitions: IndexMap::new(),
            supported_tags: IndexSet::new(),
            validation: TSDocValidationConfiguration::default(),
            supported_html_elements: IndexSet::new(),
            doc_node_manager: DocNodeManager::with_builtin_nodes(),
        };
        configuration.add_standard_tags();
        configuration
    }

    fn add_standard_tags(&mut self) {
        for definition in StandardTags::all() {
            let key = definition.tag_name_with_upper_case().to_string();
            self.supported_tags.insert(key.clone());
            self.tag_definitions.insert(key, definition.clone());
        }
    }

    /// Reset to defaults, optionally without the standard tags.
    ///
    /// The [`DocNodeManager`] is left as is, so node kinds and child rules
    /// registered through [`Self::doc_node_manager_mut`] survive.
    pub fn clear(&mut self, no_standard_tags: bool) {
        self.tag_definitions.clear();
        self.supported_tags.clear();
        self.validation = TSDocValidationConfiguration::default();
        self.supported_html_elements.clear();
        if !no_standard_tags {
            self.add_standard_tags();
        }
    }

    /// Every defined tag, in definition order.
    pub fn tag_definitions(&self) -> impl Iterator<Item = &TSDocTagDefinition> {
        self.tag_definitions.values()
    }

    pub fn supported_tag_definitions(&self) -> impl Iterator<Item = &TSDocTagDefinition> {
        self.tag_definitions
            .values()
            .filter(|def| self.supported_tags.contains(def.tag_name_with_upper_case()))
    }

    pub fn validation(&self) -> &TSDocValidationConfiguration {
        &self.validation
    }

    pub fn validation_mut(&mut self) -> &mut TSDocValidationConfiguration {
        &mut self.validation
    }

    pub fn doc_node_manager(&self) -> &DocNodeManager {
        &self.doc_node_manager
    }

    pub fn doc_node_manager_mut(&mut self) -> &mut DocNodeManager {
        &mut self.doc_node_manager
    }

    /// Case-insensitive lookup by tag name, e.g. `@remarks`.
    pub fn try_get_tag_definition(&self, tag_name: &str) -> Option<&TSDocTagDefinition> {
        self.try_get_tag_definition_with_upper_case(&tag_name.to_uppercase())
    }

    pub fn try_get_tag_definition_with_upper_case(
        &self,
        tag_name_with_upper_case: &str,
    ) -> Option<&TSDocTagDefinition> {
        self.tag_definitions.get(tag_name_with_upper_case)
    }

    /// Define a tag. Redefining a name with an identical definition is a no-op.
    pub fn add_tag_definition(
        &mut self,
        definition: TSDocTagDefinition,
    ) -> Result<(), ConfigurationError> {
        let key = definition.tag_name_with_upper_case().to_string();
        match self.tag_definitions.get(&key) {
            Some(existing) if *existing == definition => Ok(()),
            Some(_) => Err(ConfigurationError::TagAlreadyDefined {
                tag_name: definition.tag_name().to_string(),
            }),
            None => {
                tracing::debug!(tag = definition.tag_name(), "defined tag");
                self.tag_definitions.insert(key, definition);
                Ok(())
            }
        }
    }

    /// Define several tags, and mark them supported or unsupported when
    /// `supported` is given.
    pub fn add_tag_definitions(
        &mut self,
        definitions: impl IntoIterator<Item = TSDocTagDefinition>,
        supported: Option<bool>,
    ) -> Result<(), ConfigurationError> {
        for definition in definitions {
            let tag_name = definition.tag_name().to_string();
            self.add_tag_definition(definition)?;
            if let Some(supported) = supported {
                self.set_support_for_tag_name(&tag_name, supported)?;
            }
        }
        Ok(())
    }

    pub fn is_tag_supported(&self, definition: &TSDocTagDefinition) -> bool {
        self.supported_tags
            .contains(definition.tag_name_with_upper_case())
    }

    /// Mark a defined tag as supported or not. This also turns on
    /// [`TSDocValidationConfiguration::report_unsupported_tags`].
    pub fn set_support_for_tag(
        &mut self,
        definition: &TSDocTagDefinition,
        supported: bool,
    ) -> Result<(), ConfigurationError> {
        self.set_support_for_tag_name(definition.tag_name(), supported)
    }

    pub fn set_support_for_tags<'d>(
        &mut self,
        definitions: impl IntoIterator<Item = &'d TSDocTagDefinition>,
        supported: bool,
    ) -> Result<(), ConfigurationError> {
        for definition in definitions {
            self.set_support_for_tag(definition, supported)?;
        }
        Ok(())
    }

    pub(crate) fn set_support_for_tag_name(
        &mut self,
        tag_name: &str,
        supported: bool,
    ) -> Result<(), ConfigurationError> {
        let key = tag_name.to_uppercase();
        if !self.tag_definitions.contains_key(&key) {
            return Err(ConfigurationError::TagNotDefined {
                tag_name: tag_name.to_string(),
            });
        }
        if supported {
            self.supported_tags.insert(key);
        } else {
            self.supported_tags.shift_remove(&key);
        }
        self.validation.report_unsupported_tags = true;
        Ok(())
    }

    /// Replace the supported HTML element set. This also turns on
    /// [`TSDocValidationConfiguration::report_unsupported_html_elements`].
    pub fn set_supported_html_elements<S: AsRef<str>>(
        &mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<(), ConfigurationError> {
        self.supported_html_elements.clear();
        self.validation.report_unsupported_html_elements = true;
        for name in names {
            self.add_supported_html_element(name.as_ref())?;
        }
        Ok(())
    }

    pub fn add_supported_html_element(&mut self, name: &str) -> Result<(), ConfigurationError> {
        if let Some(explanation) = string_checks::explain_if_invalid_html_name(name) {
            return Err(ConfigurationError::InvalidHtmlElementName {
                name: name.to_string(),
                explanation,
            });
        }
        self.supported_html_elements.insert(name.to_string());
        Ok(())
    }

    pub fn supported_html_elements(&self) -> impl Iterator<Item = &str> {
        self.supported_html_elements.iter().map(String::as_str)
    }

    pub fn is_html_element_supported(&self, name: &str) -> bool {
        self.supported_html_elements.contains(name)
    }

    /// Whether `message_id` is one of the `tsdoc-*` identifiers this parser reports.
    pub fn is_known_message_id(&self, message_id: &str) -> bool {
        TSDocMessageId::from_str_id(message_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag_definition::TSDocTagSyntaxKind;
    use tsdoc_ast::DocNodeKind;

    #[test]
    fn test_standard_tags_are_defined_and_supported() {
        let configuration = TSDocConfiguration::new();
        let remarks = configuration.try_get_tag_definition("@REMARKS").unwrap();
        assert_eq!(remarks.tag_name(), "@remarks");
        assert!(configuration.is_tag_supported(remarks));
        assert!(!configuration.validation().report_unsupported_tags);
    }

    #[test]
    fn test_clear_without_standard_tags() {
        let mut configuration = TSDocConfiguration::new();
        configuration.clear(true);
        assert_eq!(configuration.tag_definitions().count(), 0);
        configuration.clear(false);
        assert!(configuration.try_get_tag_definition("@param").is_some());
    }

    #[test]
    fn test_clear_keeps_node_registrations() {
        let mut configuration = TSDocConfiguration::new();
        configuration
            .doc_node_manager_mut()
            .register_allowable_children(DocNodeKind::Paragraph, &[DocNodeKind::FencedCode])
            .unwrap();
        configuration.clear(false);
        assert!(configuration
            .doc_node_manager()
            .is_allowed_child(DocNodeKind::Paragraph, DocNodeKind::FencedCode));
    }

    #[test]
    fn test_redefinition_rules() {
        let mut configuration = TSDocConfiguration::new();
        let custom = TSDocTagDefinition::new("@custom", TSDocTagSyntaxKind::Block, false).unwrap();
        configuration.add_tag_definition(custom.clone()).unwrap();
        configuration.add_tag_definition(custom).unwrap();

        let conflicting =
            TSDocTagDefinition::new("@Custom", TSDocTagSyntaxKind::Modifier, false).unwrap();
        assert!(matches!(
            configuration.add_tag_definition(conflicting),
            Err(ConfigurationError::TagAlreadyDefined { .. })
        ));
    }

    #[test]
    fn test_set_support_turns_on_reporting() {
        let mut configuration = TSDocConfiguration::new();
        let custom = TSDocTagDefinition::new("@custom", TSDocTagSyntaxKind::Inline, false).unwrap();
        configuration
            .add_tag_definitions([custom.clone()], Some(false))
            .unwrap();
        assert!(!configuration.is_tag_supported(&custom));
        assert!(configuration.validation().report_unsupported_tags);

        configuration.set_support_for_tag(&custom, true).unwrap();
        assert!(configuration.is_tag_supported(&custom));
    }

    #[test]
    fn test_support_for_undefined_tag_fails() {
        let mut configuration = TSDocConfiguration::new();
        let custom = TSDocTagDefinition::new("@nowhere", TSDocTagSyntaxKind::Block, false).unwrap();
        assert!(matches!(
            configuration.set_support_for_tag(&custom, true),
            Err(ConfigurationError::TagNotDefined { .. })
        ));
    }

    #[test]
    fn test_supported_html_elements() {
        let mut configuration = TSDocConfiguration::new();
        configuration.set_supported_html_elements(["b", "br"]).unwrap();
        assert!(configuration.validation().report_unsupported_html_elements);
        assert!(configuration.is_html_element_supported("b"));
        assert!(!configuration.is_html_element_supported("script"));
        assert!(configuration
            .set_supported_html_elements(["not valid"])
            .is_err());
    }

    #[test]
    fn test_known_message_ids() {
        let configuration = TSDocConfiguration::new();
        assert!(configuration.is_known_message_id("tsdoc-undefined-tag"));
        assert!(!configuration.is_known_message_id("tsdoc-made-up"));
    }
}
