//! tsdoc_config: Tag definitions and parser configuration.
//!
//! A [`TSDocConfiguration`] is built by the caller, optionally adjusted from a
//! `tsdoc.json` file via [`TSDocConfigFile`], and then shared read-only by
//! every parse that uses it.

mod config_file;
mod configuration;
mod error;
mod standard_tags;
mod tag_definition;

pub use config_file::{TSDocConfigFile, TagDefinitionJson};
pub use configuration::{TSDocConfiguration, TSDocValidationConfiguration};
pub use error::ConfigurationError;
pub use standard_tags::StandardTags;
pub use tag_definition::{Standardization, TSDocTagDefinition, TSDocTagSyntaxKind};

// The node registry lives with the node types; re-export it for configuration users.
pub use tsdoc_ast::{DocNodeManager, DocNodeManagerError};
