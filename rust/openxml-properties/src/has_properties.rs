//! Property composition for host elements
//!
//! A host element exposes its tag and namespace through [`Element`] and its
//! property slots through [`HasProperties`]. Rendering aggregates all of it
//! into one wrapping `<ns:tagPr>` element.

use crate::error::{PropertiesError, Result};
use crate::markup::{Attribute, Container, QualifiedName};
use crate::properties::Property;
use crate::scalar::Scalar;
use crate::schema::PropertySchema;

/// Suffix appended to the host tag to name the wrapping element
pub const PROPERTIES_SUFFIX: &str = "Pr";

/// Naming capabilities of a host element
pub trait Element {
    /// Unqualified element name, e.g. `p`
    fn tag(&self) -> Option<&str>;

    /// Namespace prefix, e.g. `w`
    fn namespace(&self) -> Option<&str>;
}

/// A host element carrying declared properties and properties-attributes
///
/// Usually implemented through [`has_properties!`](crate::has_properties).
pub trait HasProperties: Element {
    /// The host type's schema
    fn schema(&self) -> Result<&'static PropertySchema>;

    /// The property object stored under `name`, if its slot is set
    fn property_slot(&self, name: &str) -> Option<&dyn Property>;

    /// The raw value stored for the attribute `name`, if set
    fn attribute_slot(&self, name: &str) -> Option<&Scalar>;

    /// Write the wrapping properties element into `container`
    ///
    /// Properties are visited in declaration order. Unset slots and property
    /// objects whose `render` is false are skipped. The wrapping element is
    /// written even when nothing inside it renders.
    fn render_properties<'c>(&self, container: &'c mut dyn Container) -> Result<&'c mut dyn Container> {
        let namespace = required(self.namespace(), "namespace")?;
        let tag = required(self.tag(), "tag")?;
        let schema = self.schema()?;

        let name = QualifiedName::new(namespace, &format!("{}{}", tag, PROPERTIES_SUFFIX));
        let attributes: Vec<Attribute> = schema
            .attributes()
            .iter()
            .filter_map(|attr| {
                self.attribute_slot(&attr.name).map(|value| {
                    Attribute::new(QualifiedName::local(&attr.display_name), attr.coercion.apply(value))
                })
            })
            .collect();

        log::debug!("rendering <{}> with {} attributes", name, attributes.len());
        container.element(&name, &attributes, &mut |body| {
            for descriptor in schema.properties() {
                let Some(property) = self.property_slot(&descriptor.name) else {
                    log::trace!("{}: `{}` is unset, skipping", name, descriptor.name);
                    continue;
                };
                if !property.render() {
                    log::trace!("{}: `{}` does not render, skipping", name, descriptor.name);
                    continue;
                }
                property.to_xml(body, None)?;
            }
            Ok(())
        })?;

        Ok(container)
    }
}

fn required<'a>(value: Option<&'a str>, capability: &'static str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PropertiesError::MissingCapability(capability)),
    }
}
