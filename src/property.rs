//! Property value objects - the dimensions of a build matrix and their values

use std::hash::{Hash, Hasher};

/// Static descriptor of one build matrix dimension.
///
/// A property has a name (`OSGroup`, `Architecture`, ...), a default
/// value, and two flags controlling how its values participate in
/// rendered identifier strings:
/// - `independent`: never rendered, regardless of policy
/// - `insignificant`: rendered only when explicitly requested, and
///   ignored when comparing configurations for compatibility
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    name: String,
    default_value: String,
    independent: bool,
    insignificant: bool,
}

impl Property {
    /// Create a property with both flags cleared
    pub fn new(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: default_value.into(),
            independent: false,
            insignificant: false,
        }
    }

    /// Mark the property independent: excluded from every rendered string
    pub fn independent(mut self) -> Self {
        self.independent = true;
        self
    }

    /// Mark the property insignificant: rendered only on request
    pub fn insignificant(mut self) -> Self {
        self.insignificant = true;
        self
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value considered implicit for this dimension
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Whether values of this property are excluded from every rendering
    pub fn is_independent(&self) -> bool {
        self.independent
    }

    /// Whether values of this property are rendered only on request
    pub fn is_insignificant(&self) -> bool {
        self.insignificant
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One concrete value bound to a [`Property`].
///
/// Besides its canonical spelling, a value carries the alternate
/// spellings (aliases) accepted for it and any extra `(name, value)`
/// pairs it contributes when a configuration is flattened into a
/// property map.
#[derive(Debug, Clone)]
pub struct PropertyValue {
    property: Property,
    value: String,
    aliases: Vec<String>,
    additional_properties: Vec<(String, String)>,
}

impl PropertyValue {
    /// Bind `value` to `property`.
    ///
    /// The alias list starts as the canonical spelling alone, so it is
    /// never empty.
    pub fn new(property: Property, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            property,
            aliases: vec![value.clone()],
            value,
            additional_properties: Vec::new(),
        }
    }

    /// Append one alternate spelling
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Append alternate spellings in order
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Contribute an extra `(name, value)` pair to property flattening
    pub fn with_additional_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.additional_properties.push((name.into(), value.into()));
        self
    }

    /// The property this value belongs to
    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Canonical spelling
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Every accepted spelling, canonical first. Never empty.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Extra pairs contributed to property flattening, in insertion order
    pub fn additional_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.additional_properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Whether this value equals its property's default, exactly
    pub fn is_default(&self) -> bool {
        self.value == self.property.default_value
    }

    /// Whether `spelling` names this value, ASCII case-insensitively
    pub fn matches(&self, spelling: &str) -> bool {
        self.aliases
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(spelling))
    }
}

/// Identity is the `(property, canonical value)` pair; aliases and
/// additional properties do not participate.
impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property && self.value == other.value
    }
}

impl Eq for PropertyValue {}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.property.hash(state);
        self.value.hash(state);
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
