//! `tsdoc.json` loading.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::configuration::TSDocConfiguration;
use crate::error::ConfigurationError;
use crate::tag_definition::{TSDocTagDefinition, TSDocTagSyntaxKind};

/// One entry of `tagDefinitions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinitionJson {
    pub tag_name: String,
    pub syntax_kind: TSDocTagSyntaxKind,
    #[serde(default)]
    pub allow_multiple: bool,
}

/// The contents of a `tsdoc.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSDocConfigFile {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub no_standard_tags: Option<bool>,
    #[serde(default)]
    pub tag_definitions: Vec<TagDefinitionJson>,
    /// Keyed by tag name including the `@`.
    #[serde(default)]
    pub support_for_tags: IndexMap<String, bool>,
    #[serde(default)]
    pub supported_html_elements: Option<Vec<String>>,
    #[serde(default)]
    pub report_unsupported_html_elements: Option<bool>,
}

impl TSDocConfigFile {
    pub fn from_json(content: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading tsdoc.json");
        Self::from_json(&content)
    }

    /// Apply this file's settings on top of `configuration`.
    pub fn configure(&self, configuration: &mut TSDocConfiguration) -> Result<(), ConfigurationError> {
        if self.no_standard_tags == Some(true) {
            configuration.clear(true);
        }

        for json in &self.tag_definitions {
            let definition =
                TSDocTagDefinition::new(&json.tag_name, json.syntax_kind, json.allow_multiple)?;
            configuration.add_tag_definition(definition)?;
        }

        for (tag_name, &supported) in &self.support_for_tags {
            configuration.set_support_for_tag_name(tag_name, supported)?;
        }

        if let Some(elements) = &self.supported_html_elements {
            configuration.set_supported_html_elements(elements)?;
        }
        if let Some(report) = self.report_unsupported_html_elements {
            configuration
                .validation_mut()
                .report_unsupported_html_elements = report;
        }
        Ok(())
    }
}
