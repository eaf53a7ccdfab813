//! Module descriptors consumed by the metadata writer.
//!
//! Descriptors are produced by an upstream extraction step and describe one
//! analysis module each: its identity, the module tree parent it attaches
//! to, its free-text description, its configurable properties, and the keys
//! of the violation messages it can emit. The builder methods only
//! accumulate state; nothing is validated or stripped until the document is
//! shaped.

use std::collections::BTreeSet;
use std::fmt;

/// Category of an analysis module.
///
/// The category decides the element name used for the module in generated
/// metadata and whether a `Check` suffix is appended when naming third-party
/// metadata files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleType {
    /// A rule check attached to the syntax tree walker.
    Check,
    /// A violation filter.
    Filter,
    /// A file filter applied before analysis.
    FileFilter,
}

impl ModuleType {
    /// Returns the lowercase label used as the module's element name.
    ///
    /// # Examples
    ///
    /// ```
    /// use checkstyle_meta::ModuleType;
    ///
    /// assert_eq!(ModuleType::FileFilter.label(), "file-filter");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Filter => "filter",
            Self::FileFilter => "file-filter",
        }
    }

    /// Parses an element label back into its category.
    ///
    /// # Examples
    ///
    /// ```
    /// use checkstyle_meta::ModuleType;
    ///
    /// assert_eq!(ModuleType::from_label("filter"), Some(ModuleType::Filter));
    /// assert_eq!(ModuleType::from_label("widget"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "check" => Some(Self::Check),
            "filter" => Some(Self::Filter),
            "file-filter" => Some(Self::FileFilter),
            _ => None,
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One configurable property of a module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulePropertyDetails {
    name: String,
    type_name: String,
    default_value: Option<String>,
    validation_type: Option<String>,
    description: String,
}

impl ModulePropertyDetails {
    /// Creates a property descriptor with no documented default value or
    /// validation classification.
    ///
    /// # Examples
    ///
    /// ```
    /// use checkstyle_meta::ModulePropertyDetails;
    ///
    /// let property = ModulePropertyDetails::new("max", "int", "Maximum allowed length.")
    ///     .with_default_value("80");
    /// assert_eq!(property.default_value(), Some("80"));
    /// assert_eq!(property.validation_type(), None);
    /// ```
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default_value: None,
            validation_type: None,
            description: description.into(),
        }
    }

    /// Records the documented default value.
    #[must_use]
    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Records the validation classification.
    #[must_use]
    pub fn with_validation_type(mut self, validation_type: impl Into<String>) -> Self {
        self.validation_type = Some(validation_type.into());
        self
    }

    /// Returns the property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the property's declared type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the documented default value, when one exists.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Returns the validation classification, when one exists.
    #[must_use]
    pub fn validation_type(&self) -> Option<&str> {
        self.validation_type.as_deref()
    }

    /// Returns the property description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Documentation-relevant description of one analysis module.
///
/// Properties keep their insertion order, including duplicates; violation
/// message keys form a set and iterate in sorted order, so repeated
/// generation from the same descriptor is deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDetails {
    name: String,
    module_type: ModuleType,
    fully_qualified_name: String,
    parent: String,
    description: String,
    properties: Vec<ModulePropertyDetails>,
    violation_message_keys: BTreeSet<String>,
}

impl ModuleDetails {
    /// Creates a descriptor with an empty parent, description, property
    /// list, and message key set.
    ///
    /// # Examples
    ///
    /// ```
    /// use checkstyle_meta::{ModuleDetails, ModuleType};
    ///
    /// let module = ModuleDetails::new(
    ///     "MyCustom",
    ///     ModuleType::Check,
    ///     "org.example.MyCustomCheck",
    /// )
    /// .with_description("Flags nothing yet.");
    /// assert_eq!(module.module_type(), ModuleType::Check);
    /// assert!(module.parent().is_empty());
    /// ```
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        module_type: ModuleType,
        fully_qualified_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            module_type,
            fully_qualified_name: fully_qualified_name.into(),
            parent: String::new(),
            description: String::new(),
            properties: Vec::new(),
            violation_message_keys: BTreeSet::new(),
        }
    }

    /// Sets the name of the module tree parent this module attaches to.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = parent.into();
        self
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a property descriptor, preserving insertion order.
    #[must_use]
    pub fn with_property(mut self, property: ModulePropertyDetails) -> Self {
        self.properties.push(property);
        self
    }

    /// Records a violation message key. Duplicates collapse into one entry.
    #[must_use]
    pub fn with_violation_message_key(mut self, key: impl Into<String>) -> Self {
        self.violation_message_keys.insert(key.into());
        self
    }

    /// Returns the simple module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the module's category.
    #[must_use]
    pub const fn module_type(&self) -> ModuleType {
        self.module_type
    }

    /// Returns the fully qualified name.
    #[must_use]
    pub fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }

    /// Returns the name of the module tree parent.
    #[must_use]
    pub fn parent(&self) -> &str {
        &self.parent
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the property descriptors in insertion order.
    #[must_use]
    pub fn properties(&self) -> &[ModulePropertyDetails] {
        &self.properties
    }

    /// Returns the violation message keys in sorted order.
    #[must_use]
    pub const fn violation_message_keys(&self) -> &BTreeSet<String> {
        &self.violation_message_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::check(ModuleType::Check, "check")]
    #[case::filter(ModuleType::Filter, "filter")]
    #[case::file_filter(ModuleType::FileFilter, "file-filter")]
    fn labels_round_trip(#[case] module_type: ModuleType, #[case] label: &str) {
        assert_eq!(module_type.label(), label);
        assert_eq!(ModuleType::from_label(label), Some(module_type));
        assert_eq!(module_type.to_string(), label);
    }

    #[test]
    fn unknown_label_parses_to_none() {
        assert_eq!(ModuleType::from_label("Check"), None);
        assert_eq!(ModuleType::from_label(""), None);
    }

    #[test]
    fn new_module_starts_empty() {
        let module = ModuleDetails::new("Foo", ModuleType::Filter, "org.example.Foo");

        assert_eq!(module.name(), "Foo");
        assert_eq!(module.fully_qualified_name(), "org.example.Foo");
        assert!(module.parent().is_empty());
        assert!(module.description().is_empty());
        assert!(module.properties().is_empty());
        assert!(module.violation_message_keys().is_empty());
    }

    #[test]
    fn properties_keep_insertion_order_and_duplicates() {
        let module = ModuleDetails::new("Foo", ModuleType::Check, "org.example.FooCheck")
            .with_property(ModulePropertyDetails::new("zeta", "int", "Last alphabetically."))
            .with_property(ModulePropertyDetails::new("alpha", "boolean", "First alphabetically."))
            .with_property(ModulePropertyDetails::new("zeta", "int", "Repeated."));

        let names: Vec<&str> = module
            .properties()
            .iter()
            .map(ModulePropertyDetails::name)
            .collect();
        assert_eq!(names, ["zeta", "alpha", "zeta"]);
    }

    #[test]
    fn message_keys_deduplicate_and_sort() {
        let module = ModuleDetails::new("Foo", ModuleType::Check, "org.example.FooCheck")
            .with_violation_message_key("ws.notPreceded")
            .with_violation_message_key("ws.notFollowed")
            .with_violation_message_key("ws.notPreceded");

        let keys: Vec<&str> = module
            .violation_message_keys()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["ws.notFollowed", "ws.notPreceded"]);
    }

    #[test]
    fn property_optionals_stay_absent_until_set() {
        let property = ModulePropertyDetails::new("tokens", "subset of tokens", "Tokens to check.");

        assert_eq!(property.default_value(), None);
        assert_eq!(property.validation_type(), None);

        let property = property
            .with_default_value("ASSIGN,BAND")
            .with_validation_type("tokenSet");

        assert_eq!(property.default_value(), Some("ASSIGN,BAND"));
        assert_eq!(property.validation_type(), Some("tokenSet"));
    }
}
