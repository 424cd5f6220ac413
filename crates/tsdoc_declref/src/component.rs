use std::fmt;

use crate::error::DeclarationReferenceError;
use crate::escape::{escape_component_string, is_well_formed_component_string};
use crate::reference::{DeclarationReference, Navigation};

/// A component name, stored in its escaped form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentString {
    text: String,
}

impl ComponentString {
    /// Build from text that is already escaped, such as `"a.b"` or `Foo`.
    pub fn from_escaped(text: &str) -> Result<Self, DeclarationReferenceError> {
        if !is_well_formed_component_string(text) {
            return Err(DeclarationReferenceError::InvalidComponent(text.to_string()));
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    /// Build from raw text, quoting it when needed.
    pub fn new(text: &str) -> Self {
        Self {
            text: escape_component_string(text),
        }
    }

    /// Parser output is kept as scanned.
    pub(crate) fn parsed(text: String) -> Self {
        Self { text }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ComponentString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A component written as a bracketed declaration reference, e.g. `[Symbol.iterator]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReference {
    reference: DeclarationReference,
}

impl ComponentReference {
    pub fn new(reference: DeclarationReference) -> Self {
        Self { reference }
    }

    /// Parse `[reference]` text, brackets included.
    pub fn parse(text: &str) -> Result<Self, DeclarationReferenceError> {
        if text.len() > 2 && text.starts_with('[') && text.ends_with(']') {
            let reference = DeclarationReference::parse(&text[1..text.len() - 1])?;
            return Ok(Self::new(reference));
        }
        Err(DeclarationReferenceError::InvalidComponentReference(
            text.to_string(),
        ))
    }

    #[inline]
    pub fn reference(&self) -> &DeclarationReference {
        &self.reference
    }

    pub fn with_reference(&self, reference: DeclarationReference) -> Self {
        if self.reference == reference {
            return self.clone();
        }
        Self::new(reference)
    }
}

impl fmt::Display for ComponentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.reference)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    String(ComponentString),
    Reference(Box<ComponentReference>),
}

impl Component {
    /// A string component from raw text.
    pub fn from_text(text: &str) -> Self {
        Component::String(ComponentString::new(text))
    }
}

impl From<ComponentString> for Component {
    fn from(value: ComponentString) -> Self {
        Component::String(value)
    }
}

impl From<ComponentReference> for Component {
    fn from(value: ComponentReference) -> Self {
        Component::Reference(Box::new(value))
    }
}

impl From<DeclarationReference> for Component {
    fn from(value: DeclarationReference) -> Self {
        ComponentReference::new(value).into()
    }
}

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Component::from_text(value)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::String(string) => string.fmt(f),
            Component::Reference(reference) => reference.fmt(f),
        }
    }
}

/// A chain of components joined by navigation steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentPath {
    Root(Component),
    Navigation {
        parent: Box<ComponentPath>,
        navigation: Navigation,
        component: Component,
    },
}

impl ComponentPath {
    pub fn root(component: impl Into<Component>) -> Self {
        ComponentPath::Root(component.into())
    }

    /// The last component in the chain.
    pub fn component(&self) -> &Component {
        match self {
            ComponentPath::Root(component) => component,
            ComponentPath::Navigation { component, .. } => component,
        }
    }

    pub fn add_navigation_step(self, navigation: Navigation, component: impl Into<Component>) -> Self {
        ComponentPath::Navigation {
            parent: Box::new(self),
            navigation,
            component: component.into(),
        }
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentPath::Root(component) => component.fmt(f),
            ComponentPath::Navigation {
                parent,
                navigation,
                component,
            } => write!(f, "{}{}{}", parent, navigation, component),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_string_escapes_raw_text() {
        assert_eq!(ComponentString::new("a.b").text(), "\"a.b\"");
        assert_eq!(ComponentString::new("Foo").text(), "Foo");
        assert!(ComponentString::from_escaped("a.b").is_err());
    }

    #[test]
    fn test_component_path_display() {
        let path = ComponentPath::root("Foo")
            .add_navigation_step(Navigation::Members, "bar")
            .add_navigation_step(Navigation::Exports, "a b.c");
        assert_eq!(path.to_string(), "Foo#bar.\"a b.c\"");
        assert_eq!(path.component().to_string(), "\"a b.c\"");
    }

    #[test]
    fn test_component_reference_parse() {
        let reference = ComponentReference::parse("[Symbol.iterator]").unwrap();
        assert_eq!(reference.to_string(), "[Symbol.iterator]");
        assert!(ComponentReference::parse("[]").is_err());
        assert!(ComponentReference::parse("Symbol").is_err());
    }
}
