//! Error types for Mendel
//!
//! Uses `thiserror` for library errors.

use thiserror::Error;

/// Result type alias for Mendel operations
pub type MendelResult<T> = Result<T, MendelError>;

/// Main error type for Mendel operations
#[derive(Error, Debug)]
pub enum MendelError {
    /// Two entries share a name while flattening a configuration
    #[error("duplicate property '{name}' while flattening configuration properties")]
    DuplicateProperty { name: String },

    /// A property is declared more than once in a space
    #[error("property '{name}' is declared more than once")]
    DuplicatePropertyDeclaration { name: String },

    /// A declared value is bound to a property other than its axis
    #[error("value '{value}' does not belong to property '{property}'")]
    ForeignValue { property: String, value: String },

    /// A property's default is missing from its declared values
    #[error("default '{default}' of property '{property}' is not among its declared values")]
    UnknownDefault { property: String, default: String },

    /// A value spelling contains the property separator
    #[error("spelling '{spelling}' of property '{property}' contains the property separator")]
    SeparatorInSpelling { property: String, spelling: String },

    /// A selection names a property the space does not declare
    #[error("unknown property '{name}'")]
    UnknownProperty { name: String },

    /// A selection names a spelling the property does not declare
    #[error("unknown value '{value}' for property '{property}'")]
    UnknownValue { property: String, value: String },

    /// A configuration string segment matches no remaining axis
    #[error("segment '{segment}' in configuration string '{configuration}' does not match any property value")]
    UnknownSegment {
        segment: String,
        configuration: String,
    },

    /// TOML parsing error in a matrix definition
    #[error("invalid matrix definition: {0}")]
    Definition(#[from] toml::de::Error),
}
