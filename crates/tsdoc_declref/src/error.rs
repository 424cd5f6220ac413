use thiserror::Error;

/// Errors raised when declaration reference text cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationReferenceError {
    #[error("Invalid DeclarationReference '{text}':\n  {}", .errors.join("\n  "))]
    Syntax { text: String, errors: Vec<String> },

    #[error("Invalid DeclarationReference '{text}'")]
    TrailingInput { text: String },

    #[error("Invalid Component '{0}'")]
    InvalidComponent(String),

    #[error("Invalid Module source '{0}'")]
    InvalidModuleSource(String),

    #[error("Invalid component reference '{0}'")]
    InvalidComponentReference(String),

    #[error("Invalid NPM package name: {0}")]
    InvalidPackageName(String),

    #[error("Invalid import path '{0}'")]
    InvalidImportPath(String),

    #[error("{0}")]
    InvalidNavigation(&'static str),
}
