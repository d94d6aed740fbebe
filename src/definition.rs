//! Declarative matrix definitions - TOML serde model
//!
//! A property space can be declared as data instead of code:
//!
//! ```text
//! [[property]]
//! name = "Framework"
//! default = "netcoreapp"
//!
//! [[property.value]]
//! value = "netcoreapp"
//! aliases = ["ncapp"]
//!
//! [[property.value]]
//! value = "netfx"
//!
//! [property.value.properties]
//! TargetFrameworkIdentifier = ".NETFramework"
//! ```
//!
//! Definitions are parsed from strings; reading files is the caller's
//! business.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::MendelResult;
use crate::property::{Property, PropertyValue};
use crate::space::PropertySpace;

/// Root of a declarative matrix definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixDefinition {
    /// Declared dimensions in rendering order
    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyDefinition>,
}

/// One declared dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    /// Canonical spelling of the dimension's default value
    pub default: String,
    #[serde(default)]
    pub independent: bool,
    #[serde(default)]
    pub insignificant: bool,
    /// Declared values; must include the default
    #[serde(default, rename = "value")]
    pub values: Vec<ValueDefinition>,
}

/// One declared value of a dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDefinition {
    /// Canonical spelling
    pub value: String,
    /// Alternate spellings, in match order
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Additional `(name, value)` pairs, flattened in key order
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl MatrixDefinition {
    /// Parse a TOML definition document
    pub fn from_toml_str(document: &str) -> MendelResult<Self> {
        Ok(toml::from_str(document)?)
    }
}

impl PropertySpace {
    /// Build a validated space from a declarative definition
    pub fn from_definition(definition: &MatrixDefinition) -> MendelResult<Self> {
        let axes = definition
            .properties
            .iter()
            .map(|declared| {
                let mut property = Property::new(declared.name.as_str(), declared.default.as_str());
                if declared.independent {
                    property = property.independent();
                }
                if declared.insignificant {
                    property = property.insignificant();
                }
                let values = declared
                    .values
                    .iter()
                    .map(|declared_value| {
                        let mut value =
                            PropertyValue::new(property.clone(), declared_value.value.as_str())
                                .with_aliases(declared_value.aliases.iter().map(String::as_str));
                        for (name, additional) in &declared_value.properties {
                            value = value.with_additional_property(
                                name.as_str(),
                                additional.as_str(),
                            );
                        }
                        value
                    })
                    .collect();
                (property, values)
            })
            .collect();
        PropertySpace::new(axes)
    }

    /// Parse a TOML definition document directly into a validated space
    pub fn from_toml_str(document: &str) -> MendelResult<Self> {
        Self::from_definition(&MatrixDefinition::from_toml_str(document)?)
    }
}
