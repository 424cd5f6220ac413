//! The tags every configuration starts with.

use once_cell::sync::Lazy;

use crate::tag_definition::{Standardization, TSDocTagDefinition, TSDocTagSyntaxKind};

use Standardization::{Core, Discretionary, Extended};
use TSDocTagSyntaxKind::{Block, Inline, Modifier};

const STANDARD_TAGS: &[(&str, TSDocTagSyntaxKind, bool, Standardization)] = &[
    ("@alpha", Modifier, false, Discretionary),
    ("@beta", Modifier, false, Discretionary),
    ("@decorator", Block, true, Extended),
    ("@defaultValue", Block, false, Extended),
    ("@deprecated", Block, false, Core),
    ("@eventProperty", Modifier, false, Extended),
    ("@example", Block, true, Extended),
    ("@experimental", Modifier, false, Discretionary),
    ("@inheritDoc", Inline, false, Extended),
    ("@internal", Modifier, false, Discretionary),
    ("@label", Inline, false, Core),
    ("@link", Inline, true, Core),
    ("@override", Modifier, false, Extended),
    ("@packageDocumentation", Modifier, false, Core),
    ("@param", Block, true, Core),
    ("@privateRemarks", Block, false, Core),
    ("@public", Modifier, false, Discretionary),
    ("@readonly", Modifier, false, Extended),
    ("@remarks", Block, false, Core),
    ("@returns", Block, false, Core),
    ("@sealed", Modifier, false, Extended),
    ("@see", Block, true, Extended),
    ("@throws", Block, true, Extended),
    ("@typeParam", Block, true, Core),
    ("@virtual", Modifier, false, Extended),
];

static ALL: Lazy<Vec<TSDocTagDefinition>> = Lazy::new(|| {
    STANDARD_TAGS
        .iter()
        .map(|&(name, syntax_kind, allow_multiple, standardization)| {
            TSDocTagDefinition::with_standardization(
                name,
                syntax_kind,
                allow_multiple,
                standardization,
            )
        })
        .collect()
});

/// The standard TSDoc tag set.
pub struct StandardTags;

impl StandardTags {
    pub fn all() -> &'static [TSDocTagDefinition] {
        &ALL
    }

    /// Case-insensitive lookup, e.g. `StandardTags::get("@Remarks")`.
    pub fn get(tag_name: &str) -> Option<&'static TSDocTagDefinition> {
        let upper = tag_name.to_uppercase();
        ALL.iter().find(|def| def.tag_name_with_upper_case() == upper)
    }
}
