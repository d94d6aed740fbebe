//! Configuration points and identifier string rendering
//!
//! A [`Configuration`] is an ordered set of property values describing one
//! point in a build/test matrix. It renders into the canonical identifier
//! strings used to name build outputs and to match configuration-specific
//! assets:
//!
//! ```text
//! Architecture = x64 (default x86), Configuration = Debug (default Debug, alias dbg)
//!
//! default string       x64
//! all identifiers      x64, x64-Debug, x64-dbg
//! ```

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use serde::{Serialize, Serializer};

use crate::error::{MendelError, MendelResult};
use crate::property::PropertyValue;

/// Separator between property values in a rendered configuration string
pub const PROPERTY_SEPARATOR: char = '-';

/// An ordered collection of property values describing one matrix point.
///
/// The value sequence is stored verbatim: no sorting, no deduplication.
/// Equality is order-sensitive over the full sequence, while the cached
/// [`fingerprint`](Configuration::fingerprint) deliberately ignores order
/// so permutations land in the same hash bucket.
#[derive(Debug, Clone)]
pub struct Configuration {
    values: Vec<PropertyValue>,
    fingerprint: OnceLock<u64>,
    compatible_fingerprint: OnceLock<u64>,
}

impl Configuration {
    /// Create a configuration from values in rendering order.
    ///
    /// The sequence is taken as-is; a sequence carrying two values for
    /// the same property is not rejected here, rendering and flattening
    /// treat the duplicates mechanically.
    pub fn new(values: Vec<PropertyValue>) -> Self {
        Self {
            values,
            fingerprint: OnceLock::new(),
            compatible_fingerprint: OnceLock::new(),
        }
    }

    /// The property values in rendering order
    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }

    /// Inclusion policy shared by every renderer.
    ///
    /// Independent values never render. Defaults are dropped when
    /// `omit_defaults` is set, before the insignificance check, so a
    /// default value of an insignificant property counts as a default.
    fn should_include(
        value: &PropertyValue,
        omit_defaults: bool,
        include_insignificant: bool,
    ) -> bool {
        if value.property().is_independent() {
            return false;
        }
        if omit_defaults && value.is_default() {
            return false;
        }
        if !include_insignificant && value.property().is_insignificant() {
            return false;
        }
        true
    }

    /// Render the configuration string under the given policy.
    ///
    /// Canonical spellings joined by [`PROPERTY_SEPARATOR`]; excluding
    /// every value yields the empty string.
    pub fn configuration_string(&self, omit_defaults: bool, include_insignificant: bool) -> String {
        let mut rendered = String::new();
        for value in &self.values {
            if Self::should_include(value, omit_defaults, include_insignificant) {
                if !rendered.is_empty() {
                    rendered.push(PROPERTY_SEPARATOR);
                }
                rendered.push_str(value.value());
            }
        }
        rendered
    }

    /// The canonical identifier: defaults omitted, insignificant values kept
    pub fn default_configuration_string(&self) -> String {
        self.configuration_string(true, true)
    }

    fn expand_with_aliases(&self, omit_defaults: bool, include_insignificant: bool) -> AliasExpansion<'_> {
        AliasExpansion::new(&self.values, omit_defaults, include_insignificant)
    }

    /// Every identifier string that names this configuration.
    ///
    /// First every alias combination with defaults omitted, then, only if
    /// some value equals its property default, every combination with
    /// defaults included. The two passes are concatenated, not
    /// deduplicated, so a caller indexing assets by identifier sees the
    /// exact historical sequence.
    pub fn configuration_strings(&self) -> ConfigurationStrings<'_> {
        ConfigurationStrings::new(self, true)
    }

    /// Like [`configuration_strings`](Configuration::configuration_strings),
    /// with insignificant values left out of the rendered strings
    pub fn significant_configuration_strings(&self) -> ConfigurationStrings<'_> {
        ConfigurationStrings::new(self, false)
    }

    /// Flatten into `(name, value)` pairs in contribution order.
    ///
    /// Each value contributes its property's name with its canonical
    /// spelling, then its additional properties. Every contributed name
    /// must be unique across the whole configuration.
    pub fn properties(&self) -> MendelResult<Vec<(String, String)>> {
        let mut properties = Vec::new();
        let mut seen = HashSet::new();
        for value in &self.values {
            push_property(&mut properties, &mut seen, value.property().name(), value.value())?;
            for (name, additional) in value.additional_properties() {
                push_property(&mut properties, &mut seen, name, additional)?;
            }
        }
        Ok(properties)
    }

    /// Order-independent 64-bit fingerprint: the XOR of every value's
    /// hash. Computed once and cached.
    pub fn fingerprint(&self) -> u64 {
        *self
            .fingerprint
            .get_or_init(|| xor_fingerprint(self.values.iter()))
    }

    /// Fingerprint over significant values only. Computed once and cached.
    pub fn compatible_fingerprint(&self) -> u64 {
        *self
            .compatible_fingerprint
            .get_or_init(|| xor_fingerprint(self.significant_values()))
    }

    fn significant_values(&self) -> impl Iterator<Item = &PropertyValue> {
        self.values
            .iter()
            .filter(|value| !value.property().is_insignificant())
    }

    /// Equality that ignores insignificant values: the significant
    /// entries must match element-wise, in order. Independent values
    /// still count.
    pub fn compatible_eq(&self, other: &Configuration) -> bool {
        self.significant_values().eq(other.significant_values())
    }

    /// Borrowing adapter keyed on compatible equality, for maps and sets
    /// that should treat configurations differing only in insignificant
    /// values as one entry
    pub fn compatible(&self) -> Compatible<&Configuration> {
        Compatible(self)
    }
}

fn push_property(
    properties: &mut Vec<(String, String)>,
    seen: &mut HashSet<String>,
    name: &str,
    value: &str,
) -> MendelResult<()> {
    if !seen.insert(name.to_string()) {
        return Err(MendelError::DuplicateProperty {
            name: name.to_string(),
        });
    }
    properties.push((name.to_string(), value.to_string()));
    Ok(())
}

fn xor_fingerprint<'a, I>(values: I) -> u64
where
    I: Iterator<Item = &'a PropertyValue>,
{
    values.fold(0, |acc, value| {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        acc ^ hasher.finish()
    })
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Configuration {}

/// Writes the cached order-independent fingerprint. Equal configurations
/// hash equal; permutations of one another collide and are separated by
/// `Eq`.
impl Hash for Configuration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint());
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.default_configuration_string())
    }
}

/// Serializes as the canonical identifier string
impl Serialize for Configuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Lazy cross-product over the alias spellings of every included value.
///
/// Dimensions follow value order, spellings within a dimension follow
/// declaration order, and the right-most dimension varies fastest. With
/// no eligible dimension the expansion yields a single empty string.
#[derive(Debug, Clone)]
struct AliasExpansion<'a> {
    dimensions: Vec<&'a [String]>,
    odometer: Vec<usize>,
    exhausted: bool,
    encountered_default: bool,
}

impl<'a> AliasExpansion<'a> {
    fn new(values: &'a [PropertyValue], omit_defaults: bool, include_insignificant: bool) -> Self {
        // tracked across all values, including ones the policy excludes
        let encountered_default = omit_defaults && values.iter().any(PropertyValue::is_default);
        let dimensions: Vec<&[String]> = values
            .iter()
            .filter(|value| Configuration::should_include(value, omit_defaults, include_insignificant))
            .map(|value| value.aliases())
            .collect();
        let odometer = vec![0; dimensions.len()];
        Self {
            dimensions,
            odometer,
            exhausted: false,
            encountered_default,
        }
    }

    fn encountered_default(&self) -> bool {
        self.encountered_default
    }

    fn advance(&mut self) {
        for position in (0..self.odometer.len()).rev() {
            self.odometer[position] += 1;
            if self.odometer[position] < self.dimensions[position].len() {
                return;
            }
            self.odometer[position] = 0;
        }
        // every position wrapped: the product is complete
        self.exhausted = true;
    }
}

impl Iterator for AliasExpansion<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let mut combination = String::new();
        for (position, spellings) in self.dimensions.iter().enumerate() {
            if position > 0 {
                combination.push(PROPERTY_SEPARATOR);
            }
            combination.push_str(&spellings[self.odometer[position]]);
        }
        self.advance();
        Some(combination)
    }
}

/// Iterator over every identifier string of a configuration.
///
/// Runs the omit-defaults alias expansion, then the defaults-included
/// expansion when a default value was encountered. Cheap to restart:
/// cloning before iteration replays from the start.
#[derive(Debug, Clone)]
pub struct ConfigurationStrings<'a> {
    first: AliasExpansion<'a>,
    second: Option<AliasExpansion<'a>>,
}

impl<'a> ConfigurationStrings<'a> {
    fn new(configuration: &'a Configuration, include_insignificant: bool) -> Self {
        let first = configuration.expand_with_aliases(true, include_insignificant);
        let second = first
            .encountered_default()
            .then(|| configuration.expand_with_aliases(false, include_insignificant));
        Self { first, second }
    }
}

impl Iterator for ConfigurationStrings<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(combination) = self.first.next() {
            return Some(combination);
        }
        self.second.as_mut()?.next()
    }
}

/// Equality adapter that ignores insignificant values.
///
/// Wraps a configuration, owned or borrowed, so hash maps and sets key
/// on [`Configuration::compatible_eq`] and the compatible fingerprint
/// instead of full order-sensitive equality:
///
/// ```text
/// let mut seen: HashSet<Compatible<Configuration>> = HashSet::new();
/// seen.insert(Compatible(linux_debug));
/// seen.contains(&Compatible(linux_release))   // true when only
///                                             // insignificant values differ
/// ```
#[derive(Debug, Clone)]
pub struct Compatible<C>(pub C);

impl<C: Borrow<Configuration>> PartialEq for Compatible<C> {
    fn eq(&self, other: &Self) -> bool {
        self.0.borrow().compatible_eq(other.0.borrow())
    }
}

impl<C: Borrow<Configuration>> Eq for Compatible<C> {}

impl<C: Borrow<Configuration>> Hash for Compatible<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.borrow().compatible_fingerprint());
    }
}
