//! Markup containers
//!
//! Properties never write text directly. They open elements on a
//! [`Container`], which hands them back a container positioned inside the new
//! element so they can fill its body. [`XmlBuilder`] is the in-memory
//! container used to produce XML text.

use std::fmt;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::{PropertiesError, Result};

/// Element or attribute name with an optional namespace prefix
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QualifiedName {
    /// Create a name qualified by `namespace`
    pub fn new(namespace: &str, local: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            local: local.to_string(),
        }
    }

    /// Name without a namespace prefix
    pub fn local(local: &str) -> Self {
        Self {
            namespace: None,
            local: local.to_string(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}:{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Attribute on an opened element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
}

impl Attribute {
    /// Create an attribute with an unescaped value
    pub fn new(name: QualifiedName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Callback filling the body of an opened element
pub type BodyFill<'a> = dyn FnMut(&mut dyn Container) -> Result<()> + 'a;

/// Something elements can be opened in
pub trait Container {
    /// Open `name` with `attributes`, run `body` inside it, then close it
    ///
    /// When `body` fails, nothing written since the element was opened
    /// remains in the container.
    fn element(
        &mut self,
        name: &QualifiedName,
        attributes: &[Attribute],
        body: &mut BodyFill<'_>,
    ) -> Result<()>;

    /// Open an element with no body
    fn empty_element(&mut self, name: &QualifiedName, attributes: &[Attribute]) -> Result<()> {
        self.element(name, attributes, &mut |_| Ok(()))
    }
}

/// Output options for [`XmlBuilder::to_xml`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriterConfig {
    /// Prefix the output with an `<?xml ...?>` declaration
    pub xml_declaration: bool,
    /// Spaces per nesting level; `None` writes everything on one line
    pub indent: Option<usize>,
}

/// In-memory XML element stream
///
/// Elements are buffered as quick-xml events and only written out by
/// [`XmlBuilder::to_xml`], so a failed body can be dropped without a trace.
#[derive(Default)]
pub struct XmlBuilder {
    events: Vec<Event<'static>>,
    config: WriterConfig,
}

impl XmlBuilder {
    /// Create a builder with the default writer config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder writing with `config`
    pub fn with_config(config: WriterConfig) -> Self {
        Self {
            events: Vec::new(),
            config,
        }
    }

    /// Number of elements written so far
    pub fn element_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Start(_)))
            .count()
    }

    /// Serialize the buffered elements
    ///
    /// Elements without children are written self-closing.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = match self.config.indent {
            Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
            None => Writer::new(Vec::new()),
        };

        if self.config.xml_declaration {
            let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
            writer.write_event(Event::Decl(decl)).map_err(write_error)?;
        }

        let mut events = self.events.iter().peekable();
        while let Some(event) = events.next() {
            if let Event::Start(start) = event {
                if matches!(events.peek(), Some(Event::End(_))) {
                    events.next();
                    writer.write_event(Event::Empty(start.clone())).map_err(write_error)?;
                    continue;
                }
            }
            writer.write_event(event.clone()).map_err(write_error)?;
        }

        String::from_utf8(writer.into_inner()).map_err(write_error)
    }
}

impl Container for XmlBuilder {
    fn element(
        &mut self,
        name: &QualifiedName,
        attributes: &[Attribute],
        body: &mut BodyFill<'_>,
    ) -> Result<()> {
        let tag = name.to_string();
        let mut start = BytesStart::new(tag.clone());
        for attr in attributes {
            start.push_attribute((attr.name.to_string().as_str(), attr.value.as_str()));
        }

        let mark = self.events.len();
        self.events.push(Event::Start(start));
        log::trace!("opened <{}> at event {}", tag, mark);

        if let Err(err) = body(self) {
            log::trace!("discarding <{}>: {}", tag, err);
            self.events.truncate(mark);
            return Err(err);
        }
        self.events.push(Event::End(BytesEnd::new(tag)));
        Ok(())
    }
}

fn write_error(err: impl fmt::Display) -> PropertiesError {
    PropertiesError::Write(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element_self_closes() {
        let mut xml = XmlBuilder::new();
        xml.empty_element(&QualifiedName::new("w", "pPr"), &[]).unwrap();
        assert_eq!(xml.to_xml().unwrap(), "<w:pPr/>");
    }

    #[test]
    fn test_nested_elements_keep_order() {
        let mut xml = XmlBuilder::new();
        xml.element(&QualifiedName::new("w", "p"), &[], &mut |body| {
            body.empty_element(&QualifiedName::new("w", "b"), &[])?;
            body.empty_element(&QualifiedName::new("w", "i"), &[])
        })
        .unwrap();

        assert_eq!(xml.to_xml().unwrap(), "<w:p><w:b/><w:i/></w:p>");
        assert_eq!(xml.element_count(), 3);
    }

    #[test]
    fn test_attributes_are_escaped() {
        let mut xml = XmlBuilder::new();
        let attrs = [
            Attribute::new(QualifiedName::local("title"), "a < b & \"c\""),
            Attribute::new(QualifiedName::new("xmlns", "w"), "http://microsoft.com"),
        ];
        xml.empty_element(&QualifiedName::local("document"), &attrs).unwrap();

        let out = xml.to_xml().unwrap();
        assert!(out.starts_with("<document title=\"a &lt; b &amp; "));
        assert!(out.ends_with(r#"xmlns:w="http://microsoft.com"/>"#));
        assert!(!out.contains("\"c\""));
    }

    #[test]
    fn test_indented_output() {
        let config = WriterConfig {
            xml_declaration: true,
            indent: Some(2),
        };
        let mut xml = XmlBuilder::with_config(config);
        xml.element(&QualifiedName::new("w", "p"), &[], &mut |body| {
            body.empty_element(&QualifiedName::new("w", "pPr"), &[])
        })
        .unwrap();

        let out = xml.to_xml().unwrap();
        assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(out.contains("<w:p>\n  <w:pPr/>\n</w:p>"));
    }

    #[test]
    fn test_failed_body_is_rolled_back() {
        let mut xml = XmlBuilder::new();
        xml.empty_element(&QualifiedName::local("before"), &[]).unwrap();

        let result = xml.element(&QualifiedName::local("p"), &[], &mut |body| {
            body.element(&QualifiedName::local("half"), &[], &mut |inner| {
                inner.empty_element(&QualifiedName::local("deeper"), &[])
            })?;
            Err(PropertiesError::invalid_argument("boom"))
        });
        assert!(result.is_err());
        assert_eq!(xml.element_count(), 1);

        // Later elements land back at document level
        xml.empty_element(&QualifiedName::local("q"), &[]).unwrap();
        assert_eq!(xml.to_xml().unwrap(), "<before/><q/>");
    }
}
