//! Mendel - build matrix configuration model
//!
//! Mendel models a point in a multi-dimensional build/test matrix (target
//! framework, OS group, architecture, build flavor, ...) as an ordered set
//! of property values and renders it into the canonical identifier strings
//! a build system uses to name outputs and match configuration-specific
//! assets.

pub mod configuration;
pub mod definition;
pub mod error;
pub mod property;
pub mod space;

// Re-exports for convenience
pub use configuration::{Compatible, Configuration, ConfigurationStrings, PROPERTY_SEPARATOR};
pub use definition::{MatrixDefinition, PropertyDefinition, ValueDefinition};
pub use error::{MendelError, MendelResult};
pub use property::{Property, PropertyValue};
pub use space::{Configurations, PropertySpace};
