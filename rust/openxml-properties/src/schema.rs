//! Property schemas
//!
//! A schema lists the properties and properties-attributes a host type
//! declares. It is built once per host type and never changes afterwards;
//! property order in the schema is the order properties serialize in.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{PropertiesError, Result};
use crate::scalar::Scalar;

/// How a property slot is created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Built from an assigned value; has a reader and a writer
    Value,
    /// Built on first read with no arguments; reader only
    Plain,
}

impl PropertyKind {
    /// Whether accessor generation adds a `set_<name>` writer
    pub fn has_writer(self) -> bool {
        matches!(self, PropertyKind::Value)
    }
}

/// A declared property slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Accessor name
    pub name: String,
    pub kind: PropertyKind,
}

/// Conversion of a stored attribute value to its XML text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coercion {
    /// `"true"` or `"false"` by truthiness
    Boolean,
    /// The value's display form
    String,
}

impl Coercion {
    /// Render a stored value as attribute text
    pub fn apply(self, value: &Scalar) -> String {
        match self {
            Coercion::Boolean => value.is_truthy().to_string(),
            Coercion::String => value.to_string(),
        }
    }
}

impl FromStr for Coercion {
    type Err = PropertiesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "boolean" => Ok(Coercion::Boolean),
            "string" => Ok(Coercion::String),
            other => Err(PropertiesError::UnknownCoercion(other.to_string())),
        }
    }
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coercion::Boolean => f.write_str("boolean"),
            Coercion::String => f.write_str("string"),
        }
    }
}

/// A declared attribute of the wrapping element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// Accessor name
    pub name: String,
    /// Attribute name emitted on the wrapping element
    pub display_name: String,
    /// Applied to the stored value when rendering
    pub coercion: Coercion,
}

/// Immutable property schema of one host type
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertySchema {
    properties: Vec<PropertyDescriptor>,
    attributes: Vec<AttributeDescriptor>,
}

impl PropertySchema {
    /// Start declaring a schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Property descriptors in declaration order
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Attribute descriptors in declaration order
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    /// Look up a property descriptor by name
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up an attribute descriptor by accessor name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Total number of declared properties and attributes
    pub fn len(&self) -> usize {
        self.properties.len() + self.attributes.len()
    }

    /// Check if nothing is declared
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for [`PropertySchema`]
///
/// Every declaration checks its name against all earlier ones, properties
/// and attributes alike.
#[derive(Default)]
pub struct SchemaBuilder {
    schema: PropertySchema,
    names: HashSet<String>,
}

impl SchemaBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property with a reader and a writer
    pub fn value_property(self, name: &str) -> Result<Self> {
        self.push_property(name, PropertyKind::Value)
    }

    /// Declare a reader-only property
    pub fn property(self, name: &str) -> Result<Self> {
        self.push_property(name, PropertyKind::Plain)
    }

    /// Declare an attribute of the wrapping element
    pub fn attribute(mut self, name: &str, display_name: &str, coercion: Coercion) -> Result<Self> {
        self.claim(name)?;
        self.schema.attributes.push(AttributeDescriptor {
            name: name.to_string(),
            display_name: display_name.to_string(),
            coercion,
        });
        Ok(self)
    }

    /// Declare an attribute whose coercion is given by name (`"boolean"`, `"string"`)
    pub fn attribute_expecting(self, name: &str, display_name: &str, coercion: &str) -> Result<Self> {
        let coercion = coercion.parse()?;
        self.attribute(name, display_name, coercion)
    }

    /// Finish the schema
    pub fn build(self) -> PropertySchema {
        log::debug!(
            "built property schema: {} properties, {} attributes",
            self.schema.properties.len(),
            self.schema.attributes.len()
        );
        self.schema
    }

    fn push_property(mut self, name: &str, kind: PropertyKind) -> Result<Self> {
        self.claim(name)?;
        self.schema.properties.push(PropertyDescriptor {
            name: name.to_string(),
            kind,
        });
        Ok(self)
    }

    fn claim(&mut self, name: &str) -> Result<()> {
        if !self.names.insert(name.to_string()) {
            return Err(PropertiesError::name_collision(name));
        }
        Ok(())
    }
}
