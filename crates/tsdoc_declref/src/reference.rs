use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tsdoc_core::string_checks::explain_if_invalid_package_name;

use crate::component::{Component, ComponentPath, ComponentReference, ComponentString};
use crate::error::DeclarationReferenceError;
use crate::escape::{
    escape_module_source_string, is_well_formed_module_source_string,
    unescape_module_source_string,
};
use crate::parser::Parser;

static PACKAGE_NAME_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((?:@([^/]+?)/)?([^/]+?))(?:/(.+))?$").unwrap());

static INVALID_IMPORT_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[./]|//|/$").unwrap());

/// How a component is reached from the one before it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// `.`
    Exports,
    /// `#`
    Members,
    /// `~`
    Locals,
}

impl Navigation {
    pub fn as_str(self) -> &'static str {
        match self {
            Navigation::Exports => ".",
            Navigation::Members => "#",
            Navigation::Locals => "~",
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of declaration a symbol refers to, written after `:`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Meaning {
    Class,
    Interface,
    TypeAlias,
    Enum,
    Namespace,
    Function,
    Variable,
    Constructor,
    Member,
    Event,
    CallSignature,
    ConstructSignature,
    IndexSignature,
    ComplexType,
}

impl Meaning {
    pub fn as_str(self) -> &'static str {
        match self {
            Meaning::Class => "class",
            Meaning::Interface => "interface",
            Meaning::TypeAlias => "type",
            Meaning::Enum => "enum",
            Meaning::Namespace => "namespace",
            Meaning::Function => "function",
            Meaning::Variable => "var",
            Meaning::Constructor => "constructor",
            Meaning::Member => "member",
            Meaning::Event => "event",
            Meaning::CallSignature => "call",
            Meaning::ConstructSignature => "new",
            Meaning::IndexSignature => "index",
            Meaning::ComplexType => "complex",
        }
    }
}

impl fmt::Display for Meaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PathComponents {
    package_name: String,
    scope_name: String,
    unscoped_package_name: String,
    import_path: String,
}

impl PathComponents {
    /// Split `path` into package name and import path, or treat the whole
    /// path as an import path when it does not start with a valid package name.
    fn from_path(path: &str) -> Self {
        let relative = path.starts_with('.') || path.starts_with('/');
        if let Some(caps) = PACKAGE_NAME_PATH.captures(path).filter(|_| !relative) {
            let package_name = caps.get(1).map_or("", |m| m.as_str());
            if explain_if_invalid_package_name(package_name).is_none() {
                return Self {
                    package_name: package_name.to_string(),
                    scope_name: caps.get(2).map_or("", |m| m.as_str()).to_string(),
                    unscoped_package_name: caps.get(3).map_or("", |m| m.as_str()).to_string(),
                    import_path: caps.get(4).map_or("", |m| m.as_str()).to_string(),
                };
            }
        }
        Self {
            import_path: path.to_string(),
            ..Self::default()
        }
    }
}

/// A module path, written before `!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSource {
    escaped_path: String,
    path: String,
    components: PathComponents,
}

impl ModuleSource {
    /// Build a module source. With `user_escaped`, `path` must already be a
    /// well-formed (possibly quoted) module source string.
    pub fn new(path: &str, user_escaped: bool) -> Result<Self, DeclarationReferenceError> {
        let escaped_path = if user_escaped {
            if !is_well_formed_module_source_string(path) {
                return Err(DeclarationReferenceError::InvalidModuleSource(
                    path.to_string(),
                ));
            }
            path.to_string()
        } else {
            escape_module_source_string(path)
        };
        let path = unescape_module_source_string(&escaped_path)?;
        Ok(Self::from_parts(escaped_path, path))
    }

    fn from_parts(escaped_path: String, path: String) -> Self {
        let components = PathComponents::from_path(&path);
        Self {
            escaped_path,
            path,
            components,
        }
    }

    /// `package_name` optionally followed by `/import_path`.
    pub fn from_package(
        package_name: &str,
        import_path: Option<&str>,
    ) -> Result<Self, DeclarationReferenceError> {
        let components = PathComponents::from_path(package_name);
        Self::from_package_components(components, package_name, import_path)
    }

    /// Like [`ModuleSource::from_package`], with the scope given separately.
    /// A leading `@` on `scope_name` is optional.
    pub fn from_scoped_package(
        scope_name: Option<&str>,
        unscoped_package_name: &str,
        import_path: Option<&str>,
    ) -> Result<Self, DeclarationReferenceError> {
        let scope_name = scope_name
            .filter(|scope| !scope.is_empty())
            .map(|scope| scope.strip_prefix('@').unwrap_or(scope));
        let package_name = match scope_name {
            Some(scope) => format!("@{}/{}", scope, unscoped_package_name),
            None => unscoped_package_name.to_string(),
        };
        let components = PathComponents {
            package_name: package_name.clone(),
            scope_name: scope_name.unwrap_or_default().to_string(),
            unscoped_package_name: unscoped_package_name.to_string(),
            import_path: String::new(),
        };
        Self::from_package_components(components, &package_name, import_path)
    }

    fn from_package_components(
        mut components: PathComponents,
        package_name: &str,
        import_path: Option<&str>,
    ) -> Result<Self, DeclarationReferenceError> {
        if let Some(explanation) = explain_if_invalid_package_name(package_name) {
            return Err(DeclarationReferenceError::InvalidPackageName(explanation));
        }
        let mut path = package_name.to_string();
        match import_path.filter(|import_path| !import_path.is_empty()) {
            Some(import_path) => {
                if INVALID_IMPORT_PATH.is_match(import_path) {
                    return Err(DeclarationReferenceError::InvalidImportPath(
                        import_path.to_string(),
                    ));
                }
                path.push('/');
                path.push_str(import_path);
                components.import_path = import_path.to_string();
            }
            None => components.import_path.clear(),
        }
        Ok(Self {
            escaped_path: escape_module_source_string(&path),
            path,
            components,
        })
    }

    /// Parser output; falls back to the escaped text when unescaping fails.
    pub(crate) fn parsed(escaped_path: &str) -> (Self, Option<DeclarationReferenceError>) {
        match unescape_module_source_string(escaped_path) {
            Ok(path) => (Self::from_parts(escaped_path.to_string(), path), None),
            Err(error) => (
                Self::from_parts(escaped_path.to_string(), escaped_path.to_string()),
                Some(error),
            ),
        }
    }

    #[inline]
    pub fn escaped_path(&self) -> &str {
        &self.escaped_path
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Empty when the path does not start with a package name.
    pub fn package_name(&self) -> &str {
        &self.components.package_name
    }

    pub fn scope_name(&self) -> &str {
        &self.components.scope_name
    }

    pub fn unscoped_package_name(&self) -> &str {
        &self.components.unscoped_package_name
    }

    pub fn import_path(&self) -> &str {
        &self.components.import_path
    }
}

impl fmt::Display for ModuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!", self.escaped_path)
    }
}

/// Where the symbol is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Module(ModuleSource),
    /// `!` with no module path.
    Global,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Module(module) => module.fmt(f),
            Source::Global => f.write_str("!"),
        }
    }
}

/// A component path with an optional meaning and overload index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolReference {
    pub component_path: Option<ComponentPath>,
    pub meaning: Option<Meaning>,
    pub overload_index: Option<u32>,
}

impl SymbolReference {
    pub fn new(component_path: Option<ComponentPath>) -> Self {
        Self {
            component_path,
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.component_path.is_none() && self.meaning.is_none() && self.overload_index.is_none()
    }

    pub fn with_component_path(mut self, component_path: Option<ComponentPath>) -> Self {
        self.component_path = component_path;
        self
    }

    pub fn with_meaning(mut self, meaning: Option<Meaning>) -> Self {
        self.meaning = meaning;
        self
    }

    pub fn with_overload_index(mut self, overload_index: Option<u32>) -> Self {
        self.overload_index = overload_index;
        self
    }

    /// Append a step to the component path. Meaning and overload index are dropped.
    pub fn add_navigation_step(
        self,
        navigation: Navigation,
        component: impl Into<Component>,
    ) -> Result<Self, DeclarationReferenceError> {
        match self.component_path {
            Some(path) => Ok(Self::new(Some(path.add_navigation_step(navigation, component)))),
            None => Err(DeclarationReferenceError::InvalidNavigation(
                "Cannot add a navigation step to an empty symbol reference.",
            )),
        }
    }
}

impl fmt::Display for SymbolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.component_path {
            path.fmt(f)?;
        }
        match (self.meaning, self.overload_index) {
            (Some(meaning), Some(index)) => write!(f, ":{}({})", meaning, index),
            (Some(meaning), None) => write!(f, ":{}", meaning),
            (None, Some(index)) => write!(f, ":{}", index),
            (None, None) => Ok(()),
        }
    }
}

/// A parsed declaration reference: `source? navigation? symbol?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationReference {
    source: Option<Source>,
    navigation: Option<Navigation>,
    symbol: Option<SymbolReference>,
}

impl DeclarationReference {
    pub fn new(
        source: Option<Source>,
        navigation: Option<Navigation>,
        symbol: Option<SymbolReference>,
    ) -> Self {
        Self {
            source,
            navigation,
            symbol,
        }
    }

    pub fn parse(text: &str) -> Result<Self, DeclarationReferenceError> {
        let mut parser = Parser::new(text);
        let reference = parser.parse_declaration_reference();
        if !parser.errors().is_empty() {
            return Err(DeclarationReferenceError::Syntax {
                text: text.to_string(),
                errors: parser.into_errors(),
            });
        }
        if !parser.is_at_end() {
            return Err(DeclarationReferenceError::TrailingInput {
                text: text.to_string(),
            });
        }
        Ok(reference)
    }

    /// Parse a single component, either `[reference]` or a possibly quoted name.
    pub fn parse_component(text: &str) -> Result<Component, DeclarationReferenceError> {
        if text.starts_with('[') {
            return Ok(ComponentReference::parse(text)?.into());
        }
        Ok(ComponentString::from_escaped(text)?.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn package(
        package_name: &str,
        import_path: Option<&str>,
    ) -> Result<Self, DeclarationReferenceError> {
        let source = ModuleSource::from_package(package_name, import_path)?;
        Ok(Self::new(Some(Source::Module(source)), None, None))
    }

    pub fn module(path: &str, user_escaped: bool) -> Result<Self, DeclarationReferenceError> {
        let source = ModuleSource::new(path, user_escaped)?;
        Ok(Self::new(Some(Source::Module(source)), None, None))
    }

    pub fn global() -> Self {
        Self::new(Some(Source::Global), None, None)
    }

    #[inline]
    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    #[inline]
    pub fn symbol(&self) -> Option<&SymbolReference> {
        self.symbol.as_ref()
    }

    /// The navigation from the source to the symbol. Only meaningful when
    /// both are present; a global source always navigates through locals.
    pub fn navigation(&self) -> Option<Navigation> {
        match (&self.source, &self.symbol) {
            (Some(Source::Global), Some(_)) => Some(Navigation::Locals),
            (Some(_), Some(_)) => Some(self.navigation.unwrap_or(Navigation::Exports)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.symbol.is_none()
    }

    pub fn with_source(mut self, source: Option<Source>) -> Self {
        self.source = source;
        self
    }

    /// Only `Exports` and `Locals` are meaningful here.
    pub fn with_navigation(mut self, navigation: Option<Navigation>) -> Self {
        self.navigation = navigation;
        self
    }

    pub fn with_symbol(mut self, symbol: Option<SymbolReference>) -> Self {
        self.symbol = symbol;
        self
    }

    pub fn with_component_path(self, component_path: Option<ComponentPath>) -> Self {
        let symbol = self.symbol.clone().unwrap_or_default();
        self.with_symbol(Some(symbol.with_component_path(component_path)))
    }

    pub fn with_meaning(self, meaning: Option<Meaning>) -> Self {
        if self.symbol.is_none() && meaning.is_none() {
            return self;
        }
        let symbol = self.symbol.clone().unwrap_or_default();
        self.with_symbol(Some(symbol.with_meaning(meaning)))
    }

    pub fn with_overload_index(self, overload_index: Option<u32>) -> Self {
        if self.symbol.is_none() && overload_index.is_none() {
            return self;
        }
        let symbol = self.symbol.clone().unwrap_or_default();
        self.with_symbol(Some(symbol.with_overload_index(overload_index)))
    }

    /// Extend the symbol with another component, starting a new symbol
    /// when there is none yet.
    pub fn add_navigation_step(
        self,
        navigation: Navigation,
        component: impl Into<Component>,
    ) -> Result<Self, DeclarationReferenceError> {
        if let Some(symbol) = self.symbol.clone() {
            let symbol = symbol.add_navigation_step(navigation, component)?;
            return Ok(self.with_symbol(Some(symbol)));
        }
        if navigation == Navigation::Members {
            return Err(DeclarationReferenceError::InvalidNavigation(
                "Cannot add a class member to a module source.",
            ));
        }
        let symbol = SymbolReference::new(Some(ComponentPath::root(component)));
        Ok(self.with_navigation(Some(navigation)).with_symbol(Some(symbol)))
    }
}

impl fmt::Display for DeclarationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            source.fmt(f)?;
        }
        if matches!(self.source, Some(Source::Module(_)))
            && self.navigation() == Some(Navigation::Locals)
        {
            f.write_str("~")?;
        }
        if let Some(symbol) = &self.symbol {
            symbol.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_source_package_parts() {
        let source = ModuleSource::new("@scope/my-package/lib/index", true).unwrap();
        assert_eq!(source.package_name(), "@scope/my-package");
        assert_eq!(source.scope_name(), "scope");
        assert_eq!(source.unscoped_package_name(), "my-package");
        assert_eq!(source.import_path(), "lib/index");
        assert_eq!(source.to_string(), "@scope/my-package/lib/index!");
    }

    #[test]
    fn test_module_source_relative_path() {
        let source = ModuleSource::new("./lib/index", true).unwrap();
        assert_eq!(source.package_name(), "");
        assert_eq!(source.import_path(), "./lib/index");
    }

    #[test]
    fn test_module_source_from_package() {
        let source = ModuleSource::from_scoped_package(Some("@scope"), "pkg", Some("lib")).unwrap();
        assert_eq!(source.path(), "@scope/pkg/lib");
        assert_eq!(source.scope_name(), "scope");
        assert_eq!(source.import_path(), "lib");

        assert!(matches!(
            ModuleSource::from_package("Not Valid", None),
            Err(DeclarationReferenceError::InvalidPackageName(_))
        ));
        assert!(matches!(
            ModuleSource::from_package("pkg", Some("lib/")),
            Err(DeclarationReferenceError::InvalidImportPath(_))
        ));
    }

    #[test]
    fn test_module_source_escapes_raw_path() {
        let source = ModuleSource::new("a!b", false).unwrap();
        assert_eq!(source.escaped_path(), "\"a!b\"");
        assert_eq!(source.path(), "a!b");
        assert!(ModuleSource::new("a!b", true).is_err());
    }

    #[test]
    fn test_symbol_display() {
        let symbol = SymbolReference::new(Some(ComponentPath::root("Foo")))
            .with_meaning(Some(Meaning::Member))
            .with_overload_index(Some(2));
        assert_eq!(symbol.to_string(), "Foo:member(2)");
        assert_eq!(symbol.clone().with_meaning(None).to_string(), "Foo:2");
        assert_eq!(symbol.with_overload_index(None).to_string(), "Foo:member");
    }

    #[test]
    fn test_navigation_defaults() {
        let symbol = SymbolReference::new(Some(ComponentPath::root("Foo")));
        assert_eq!(DeclarationReference::empty().navigation(), None);
        assert_eq!(
            DeclarationReference::global()
                .with_symbol(Some(symbol.clone()))
                .navigation(),
            Some(Navigation::Locals)
        );
        let reference = DeclarationReference::package("pkg", None)
            .unwrap()
            .with_symbol(Some(symbol));
        assert_eq!(reference.navigation(), Some(Navigation::Exports));
        assert_eq!(reference.to_string(), "pkg!Foo");
    }

    #[test]
    fn test_builders() {
        let reference = DeclarationReference::package("pkg", None)
            .unwrap()
            .add_navigation_step(Navigation::Locals, "Foo")
            .unwrap()
            .add_navigation_step(Navigation::Members, "bar")
            .unwrap()
            .with_meaning(Some(Meaning::Member));
        assert_eq!(reference.to_string(), "pkg!~Foo#bar:member");

        assert!(DeclarationReference::package("pkg", None)
            .unwrap()
            .add_navigation_step(Navigation::Members, "Foo")
            .is_err());
        assert!(DeclarationReference::empty().is_empty());
        assert!(!DeclarationReference::global().is_empty());
    }
}
