use std::path::PathBuf;

use thiserror::Error;
use tsdoc_ast::DocNodeManagerError;

/// Errors raised while building a configuration. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Invalid tag name {tag_name:?}: {explanation}")]
    InvalidTagName {
        tag_name: String,
        explanation: String,
    },

    #[error("A different tag definition is already registered using the name {tag_name:?}")]
    TagAlreadyDefined { tag_name: String },

    #[error("The tag {tag_name:?} is not defined in this configuration")]
    TagNotDefined { tag_name: String },

    #[error("Invalid HTML element name {name:?}: {explanation}")]
    InvalidHtmlElementName { name: String, explanation: String },

    #[error(transparent)]
    DocNodeManager(#[from] DocNodeManagerError),

    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tsdoc.json: {0}")]
    Json(#[from] serde_json::Error),
}
