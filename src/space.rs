//! Property spaces - declared matrix dimensions and point construction
//!
//! A [`PropertySpace`] owns the declared axes of a build matrix. The core
//! [`Configuration`] type stays permissive; the space is the strict layer
//! that validates declarations once and then hands out well-formed
//! configurations by selection, by parsing an identifier string, or by
//! enumerating the whole matrix.

use std::collections::HashSet;

use crate::configuration::{Compatible, Configuration, PROPERTY_SEPARATOR};
use crate::error::{MendelError, MendelResult};
use crate::property::{Property, PropertyValue};

/// One dimension: a property plus its declared values
#[derive(Debug, Clone)]
struct Axis {
    property: Property,
    values: Vec<PropertyValue>,
    default_index: usize,
}

impl Axis {
    fn default_value(&self) -> &PropertyValue {
        &self.values[self.default_index]
    }

    fn find(&self, spelling: &str) -> Option<&PropertyValue> {
        self.values.iter().find(|value| value.matches(spelling))
    }
}

/// The declared dimensions of a build matrix, in rendering order.
#[derive(Debug, Clone)]
pub struct PropertySpace {
    axes: Vec<Axis>,
}

impl PropertySpace {
    /// Build a space from `(property, declared values)` pairs.
    ///
    /// Declarations are validated once:
    /// - property names must be unique
    /// - every declared value must be bound to its axis property
    /// - no spelling may contain [`PROPERTY_SEPARATOR`]
    /// - every axis must declare its property's default value
    pub fn new(axes: Vec<(Property, Vec<PropertyValue>)>) -> MendelResult<Self> {
        let mut names = HashSet::new();
        let mut validated = Vec::with_capacity(axes.len());
        for (property, values) in axes {
            if !names.insert(property.name().to_string()) {
                return Err(MendelError::DuplicatePropertyDeclaration {
                    name: property.name().to_string(),
                });
            }
            for value in &values {
                if value.property() != &property {
                    return Err(MendelError::ForeignValue {
                        property: property.name().to_string(),
                        value: value.value().to_string(),
                    });
                }
                for spelling in value.aliases() {
                    if spelling.contains(PROPERTY_SEPARATOR) {
                        return Err(MendelError::SeparatorInSpelling {
                            property: property.name().to_string(),
                            spelling: spelling.clone(),
                        });
                    }
                }
            }
            let default_index = values.iter().position(|value| value.is_default()).ok_or_else(
                || MendelError::UnknownDefault {
                    property: property.name().to_string(),
                    default: property.default_value().to_string(),
                },
            )?;
            validated.push(Axis {
                property,
                values,
                default_index,
            });
        }
        Ok(Self { axes: validated })
    }

    /// Number of declared dimensions
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Whether the space declares no dimensions
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// The declared properties in rendering order
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.axes.iter().map(|axis| &axis.property)
    }

    /// Look up a declared property by exact name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.axis(name).map(|axis| &axis.property)
    }

    /// The declared values of a property, by exact name
    pub fn values(&self, name: &str) -> Option<&[PropertyValue]> {
        self.axis(name).map(|axis| axis.values.as_slice())
    }

    fn axis(&self, name: &str) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.property.name() == name)
    }

    /// The configuration with every axis at its default value
    pub fn default_configuration(&self) -> Configuration {
        Configuration::new(
            self.axes
                .iter()
                .map(|axis| axis.default_value().clone())
                .collect(),
        )
    }

    /// Compose a configuration from named selections.
    ///
    /// Each selection is `(property name, spelling)`; property names
    /// match exactly, spellings match any declared alias ASCII
    /// case-insensitively. Later selections override earlier ones for
    /// the same property. Unselected axes fall back to their defaults.
    pub fn resolve<'s, I>(&self, selections: I) -> MendelResult<Configuration>
    where
        I: IntoIterator<Item = (&'s str, &'s str)>,
    {
        let mut chosen: Vec<Option<&PropertyValue>> = vec![None; self.axes.len()];
        for (name, spelling) in selections {
            let position = self
                .axes
                .iter()
                .position(|axis| axis.property.name() == name)
                .ok_or_else(|| MendelError::UnknownProperty {
                    name: name.to_string(),
                })?;
            let value =
                self.axes[position]
                    .find(spelling)
                    .ok_or_else(|| MendelError::UnknownValue {
                        property: name.to_string(),
                        value: spelling.to_string(),
                    })?;
            chosen[position] = Some(value);
        }
        let values = self
            .axes
            .iter()
            .zip(chosen)
            .map(|(axis, selected)| selected.unwrap_or_else(|| axis.default_value()).clone())
            .collect();
        Ok(Configuration::new(values))
    }

    /// Parse a rendered identifier string back into a configuration.
    ///
    /// Segments are matched greedily against the axes in declaration
    /// order: each axis consumes the next segment if one of its
    /// spellings matches, otherwise it falls back to its default.
    /// Independent axes never consume a segment. A segment left over
    /// after the last axis fails with [`MendelError::UnknownSegment`];
    /// the empty string parses to the all-defaults point.
    pub fn parse(&self, configuration_string: &str) -> MendelResult<Configuration> {
        let segments: Vec<&str> = if configuration_string.is_empty() {
            Vec::new()
        } else {
            configuration_string.split(PROPERTY_SEPARATOR).collect()
        };
        let mut segments = segments.into_iter().peekable();

        let mut values = Vec::with_capacity(self.axes.len());
        for axis in &self.axes {
            if axis.property.is_independent() {
                values.push(axis.default_value().clone());
                continue;
            }
            match segments.peek().copied().and_then(|segment| axis.find(segment)) {
                Some(value) => {
                    values.push(value.clone());
                    segments.next();
                }
                None => values.push(axis.default_value().clone()),
            }
        }
        if let Some(segment) = segments.next() {
            return Err(MendelError::UnknownSegment {
                segment: segment.to_string(),
                configuration: configuration_string.to_string(),
            });
        }
        Ok(Configuration::new(values))
    }

    /// Every point of the matrix: the cross-product of the declared
    /// values of every axis, right-most axis varying fastest
    pub fn configurations(&self) -> Configurations<'_> {
        Configurations::over(self.axes.iter().map(|axis| axis.values.as_slice()).collect())
    }

    /// One canonical representative per compatibility class.
    ///
    /// Independent and insignificant axes are pinned to their defaults;
    /// representatives are deduplicated under compatible equality, first
    /// occurrence winning.
    pub fn significant_configurations(&self) -> Vec<Configuration> {
        let dimensions = self
            .axes
            .iter()
            .map(|axis| {
                if axis.property.is_independent() || axis.property.is_insignificant() {
                    std::slice::from_ref(axis.default_value())
                } else {
                    axis.values.as_slice()
                }
            })
            .collect();
        let mut seen = HashSet::new();
        let mut representatives = Vec::new();
        for configuration in Configurations::over(dimensions) {
            if seen.insert(Compatible(configuration.clone())) {
                representatives.push(configuration);
            }
        }
        representatives
    }
}

/// Lazy cross-product over declared axis values.
#[derive(Debug, Clone)]
pub struct Configurations<'a> {
    dimensions: Vec<&'a [PropertyValue]>,
    odometer: Vec<usize>,
    exhausted: bool,
}

impl<'a> Configurations<'a> {
    fn over(dimensions: Vec<&'a [PropertyValue]>) -> Self {
        let exhausted = dimensions.iter().any(|values| values.is_empty());
        let odometer = vec![0; dimensions.len()];
        Self {
            dimensions,
            odometer,
            exhausted,
        }
    }
}

impl Iterator for Configurations<'_> {
    type Item = Configuration;

    fn next(&mut self) -> Option<Configuration> {
        if self.exhausted {
            return None;
        }
        let values = self
            .dimensions
            .iter()
            .zip(&self.odometer)
            .map(|(values, &index)| values[index].clone())
            .collect();
        let mut advanced = false;
        for position in (0..self.odometer.len()).rev() {
            self.odometer[position] += 1;
            if self.odometer[position] < self.dimensions[position].len() {
                advanced = true;
                break;
            }
            self.odometer[position] = 0;
        }
        if !advanced {
            self.exhausted = true;
        }
        Some(Configuration::new(values))
    }
}
