//! tsdoc_core: Core utilities shared by the TSDoc parser crates.
//!
//! Provides the borrowed text range type every later stage slices, line
//! mapping for diagnostics, and the small string validation predicates
//! used by the parser and the configuration registry.

pub mod string_checks;
pub mod text;

// Re-export commonly used types
pub use text::{LineAndColumn, LineMap, TextPos, TextRange};
