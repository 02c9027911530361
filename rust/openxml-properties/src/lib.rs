//! OOXML property composition
//!
//! Host document elements (paragraphs, runs, tables) declare named
//! properties and properties-attributes. Each property decides on its own
//! whether it renders; the host aggregates the rendering ones into a single
//! `<ns:tagPr>` child element.
//!
//! - `schema`: immutable per-type property schemas
//! - `properties`: property value objects and the render-or-skip contract
//! - `has_properties`: host traits and the rendering loop
//! - `markup`: the element container contract and an in-memory XML builder

pub mod error;
pub mod scalar;
pub mod markup;
pub mod properties;
pub mod schema;
pub mod has_properties;
mod macros;

#[doc(hidden)]
pub use paste;

pub use error::{PropertiesError, Result};
pub use scalar::Scalar;
pub use markup::{Attribute, BodyFill, Container, QualifiedName, WriterConfig, XmlBuilder};
pub use properties::{FromValue, OnOffProperty, Property, PropertyTag, SomeProperty, ValProperty, ValueProperty};
pub use schema::{AttributeDescriptor, Coercion, PropertyDescriptor, PropertyKind, PropertySchema, SchemaBuilder};
pub use has_properties::{Element, HasProperties, PROPERTIES_SUFFIX};
