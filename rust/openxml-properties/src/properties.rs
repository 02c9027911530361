//! Property value objects
//!
//! A property object decides two things independently: whether it renders at
//! all ([`Property::render`]) and what it writes into the wrapping element
//! when it does ([`Property::to_xml`]). A property can therefore be present
//! and rendering while contributing an empty body.

use std::fmt;
use std::marker::PhantomData;

use crate::error::{PropertiesError, Result};
use crate::markup::{Attribute, BodyFill, Container, QualifiedName};
use crate::scalar::Scalar;

/// A property object owned by a host element
pub trait Property {
    /// Whether this property contributes to the wrapping element
    fn render(&self) -> bool {
        true
    }

    /// Serialize into `container`
    ///
    /// The default contributes nothing beyond what `fill` writes.
    fn to_xml(&self, container: &mut dyn Container, fill: Option<&mut BodyFill<'_>>) -> Result<()> {
        match fill {
            Some(fill) => fill(container),
            None => Ok(()),
        }
    }
}

/// Construction of a property object from an assigned value
pub trait FromValue: Sized {
    /// Build the property; fails with `InvalidArgument` on `Scalar::Nil`
    fn from_value(value: Scalar) -> Result<Self>;
}

fn require_value(value: Scalar) -> Result<Scalar> {
    if value.is_nil() {
        return Err(PropertiesError::invalid_argument(
            "value properties cannot be built from an absent value",
        ));
    }
    Ok(value)
}

/// Base property: always renders, empty body by default
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SomeProperty;

impl SomeProperty {
    /// Create a base property
    pub fn new() -> Self {
        Self
    }
}

impl Property for SomeProperty {}

/// Property wrapping a single scalar
#[derive(Clone, Debug, PartialEq)]
pub struct ValueProperty {
    value: Scalar,
}

impl ValueProperty {
    /// Wrap `value`; fails with `InvalidArgument` when it is absent
    pub fn new(value: impl Into<Scalar>) -> Result<Self> {
        let value = require_value(value.into())?;
        Ok(Self { value })
    }

    /// The wrapped value
    pub fn value(&self) -> &Scalar {
        &self.value
    }
}

impl Property for ValueProperty {
    fn render(&self) -> bool {
        self.value.is_truthy()
    }
}

impl FromValue for ValueProperty {
    fn from_value(value: Scalar) -> Result<Self> {
        Self::new(value)
    }
}

/// Names the element a domain property serializes as
pub trait PropertyTag {
    const NAMESPACE: &'static str;
    const TAG: &'static str;

    /// `NAMESPACE:TAG`
    fn qualified_name() -> QualifiedName {
        QualifiedName::new(Self::NAMESPACE, Self::TAG)
    }
}

fn fill_body(fill: &mut Option<&mut BodyFill<'_>>, container: &mut dyn Container) -> Result<()> {
    match fill {
        Some(fill) => fill(container),
        None => Ok(()),
    }
}

/// Toggle property, written as `<ns:tag/>` when its value is truthy
pub struct OnOffProperty<T> {
    value: Scalar,
    tag: PhantomData<T>,
}

impl<T> OnOffProperty<T> {
    /// Wrap `value`; fails with `InvalidArgument` when it is absent
    pub fn new(value: impl Into<Scalar>) -> Result<Self> {
        let value = require_value(value.into())?;
        Ok(Self {
            value,
            tag: PhantomData,
        })
    }

    /// The wrapped value
    pub fn value(&self) -> &Scalar {
        &self.value
    }
}

impl<T> fmt::Debug for OnOffProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnOffProperty").field("value", &self.value).finish()
    }
}

impl<T: PropertyTag> Property for OnOffProperty<T> {
    fn render(&self) -> bool {
        self.value.is_truthy()
    }

    fn to_xml(&self, container: &mut dyn Container, mut fill: Option<&mut BodyFill<'_>>) -> Result<()> {
        container.element(&T::qualified_name(), &[], &mut |body| fill_body(&mut fill, body))
    }
}

impl<T> FromValue for OnOffProperty<T> {
    fn from_value(value: Scalar) -> Result<Self> {
        Self::new(value)
    }
}

/// Property written as `<ns:tag ns:val="value"/>`
pub struct ValProperty<T> {
    value: Scalar,
    tag: PhantomData<T>,
}

impl<T> ValProperty<T> {
    /// Wrap `value`; fails with `InvalidArgument` when it is absent
    pub fn new(value: impl Into<Scalar>) -> Result<Self> {
        let value = require_value(value.into())?;
        Ok(Self {
            value,
            tag: PhantomData,
        })
    }

    /// The wrapped value
    pub fn value(&self) -> &Scalar {
        &self.value
    }
}

impl<T> fmt::Debug for ValProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValProperty").field("value", &self.value).finish()
    }
}

impl<T: PropertyTag> Property for ValProperty<T> {
    fn render(&self) -> bool {
        self.value.is_truthy()
    }

    fn to_xml(&self, container: &mut dyn Container, mut fill: Option<&mut BodyFill<'_>>) -> Result<()> {
        let val = Attribute::new(QualifiedName::new(T::NAMESPACE, "val"), self.value.to_string());
        container.element(&T::qualified_name(), &[val], &mut |body| fill_body(&mut fill, body))
    }
}

impl<T> FromValue for ValProperty<T> {
    fn from_value(value: Scalar) -> Result<Self> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::XmlBuilder;

    struct Justification;

    impl PropertyTag for Justification {
        const NAMESPACE: &'static str = "w";
        const TAG: &'static str = "jc";
    }

    struct Bold;

    impl PropertyTag for Bold {
        const NAMESPACE: &'static str = "w";
        const TAG: &'static str = "b";
    }

    #[test]
    fn test_some_property_always_renders() {
        assert!(SomeProperty::new().render());
    }

    #[test]
    fn test_some_property_has_empty_body() {
        let mut xml = XmlBuilder::new();
        SomeProperty.to_xml(&mut xml, None).unwrap();
        assert_eq!(xml.element_count(), 0);
    }

    #[test]
    fn test_some_property_runs_fill() {
        let mut xml = XmlBuilder::new();
        let fill: &mut BodyFill<'_> =
            &mut |body| body.empty_element(&QualifiedName::new("w", "spacing"), &[]);
        SomeProperty.to_xml(&mut xml, Some(fill)).unwrap();
        assert_eq!(xml.to_xml().unwrap(), "<w:spacing/>");
    }

    #[test]
    fn test_value_property_rejects_nil() {
        let err = ValueProperty::new(Scalar::Nil).unwrap_err();
        assert!(matches!(err, PropertiesError::InvalidArgument(_)));
        assert!(ValueProperty::new(None::<i32>).is_err());
    }

    #[test]
    fn test_value_property_render_follows_truthiness() {
        assert!(ValueProperty::new("A Value").unwrap().render());
        assert!(ValueProperty::new(0).unwrap().render());
        assert!(!ValueProperty::new(false).unwrap().render());
    }

    #[test]
    fn test_value_property_body_is_pass_through() {
        let mut xml = XmlBuilder::new();
        ValueProperty::new(true).unwrap().to_xml(&mut xml, None).unwrap();
        assert_eq!(xml.to_xml().unwrap(), "");
    }

    #[test]
    fn test_on_off_property() {
        let bold = OnOffProperty::<Bold>::from_value(Scalar::from(true)).unwrap();
        assert!(bold.render());

        let mut xml = XmlBuilder::new();
        bold.to_xml(&mut xml, None).unwrap();
        assert_eq!(xml.to_xml().unwrap(), "<w:b/>");

        assert!(!OnOffProperty::<Bold>::new(false).unwrap().render());
    }

    #[test]
    fn test_val_property() {
        let jc = ValProperty::<Justification>::new("center").unwrap();

        let mut xml = XmlBuilder::new();
        jc.to_xml(&mut xml, None).unwrap();
        assert_eq!(xml.to_xml().unwrap(), r#"<w:jc w:val="center"/>"#);
        assert!(ValProperty::<Justification>::from_value(Scalar::Nil).is_err());
    }
}
