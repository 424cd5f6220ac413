//! tsdoc_declref: The standalone declaration reference grammar.
//!
//! A declaration reference names an API item independently of any doc
//! comment, for example `@scope/my-package/lib!Widget#render:member(1)`.
//! [`DeclarationReference::parse`] turns such text into immutable value
//! objects, and their `Display` impls print the normalized form back.

mod component;
mod error;
pub mod escape;
mod parser;
mod reference;
pub mod scanner;

pub use component::{Component, ComponentPath, ComponentReference, ComponentString};
pub use error::DeclarationReferenceError;
pub use reference::{DeclarationReference, Meaning, ModuleSource, Navigation, Source, SymbolReference};
