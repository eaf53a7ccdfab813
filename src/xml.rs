//! Intermediate document tree and its serialisation routine.
//!
//! Documents are built first as plain values, elements carrying ordered
//! attributes and child nodes, and only then handed to [`render_document`]
//! for pretty-printing. Free-form prose travels in CDATA sections so
//! markup-significant characters in descriptions pass through unaltered.
//! Building and serialising are decoupled: a tree can be inspected or
//! compared without ever touching a writer.

use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, Event};
use thiserror::Error;

/// Error produced when serialising a document tree.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct RenderError {
    reason: String,
}

fn render_err(source: impl std::fmt::Display) -> RenderError {
    RenderError {
        reason: source.to_string(),
    }
}

/// One node in a document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlNode {
    /// A nested element.
    Element(XmlElement),
    /// A CDATA section whose content is not interpreted for markup.
    CData(String),
}

/// An element with ordered attributes and children.
///
/// Attributes and children appear in the serialised output in insertion
/// order. The builder methods only accumulate what is present; an absent
/// optional attribute is never added and later stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Creates an element with no attributes or children.
    ///
    /// # Examples
    ///
    /// ```
    /// use checkstyle_meta::xml::XmlElement;
    ///
    /// let element = XmlElement::new("message-key").attribute("key", "ws.notFollowed");
    /// assert_eq!(element.attribute_value("key"), Some("ws.notFollowed"));
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Appends an attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends an attribute only when a value is present.
    #[must_use]
    pub fn optional_attribute(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.attribute(name, value),
            None => self,
        }
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Appends a CDATA section.
    #[must_use]
    pub fn cdata(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::CData(text.into()));
        self
    }

    /// Returns the element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Looks up an attribute value by name.
    #[must_use]
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first child element with the given name.
    #[must_use]
    pub fn find_child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|child| child.name == name)
    }

    /// Iterates over the child elements, skipping text sections.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::CData(_) => None,
        })
    }

    /// Concatenates the element's direct CDATA sections.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::CData(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}

/// Serialises a document tree to pretty-printed XML.
///
/// The output starts with an XML declaration, nests elements with four-space
/// indentation, renders childless elements self-closing, and ends with a
/// trailing newline. CDATA sections stay on the line of their parent
/// element.
///
/// # Examples
///
/// ```
/// use checkstyle_meta::xml::{XmlElement, render_document};
///
/// let tree = XmlElement::new("module")
///     .child(XmlElement::new("check").attribute("name", "Foo"));
/// let xml = render_document(&tree)?;
/// assert!(xml.contains("<check name=\"Foo\"/>"));
/// # Ok::<(), checkstyle_meta::xml::RenderError>(())
/// ```
///
/// # Errors
///
/// Returns [`RenderError`] when the underlying writer rejects an event or
/// the rendered bytes are not valid UTF-8.
pub fn render_document(root: &XmlElement) -> Result<String, RenderError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(render_err)?;
    write_element(&mut writer, root)?;
    let mut rendered = writer.into_inner();
    rendered.push(b'\n');
    String::from_utf8(rendered).map_err(render_err)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), RenderError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }
    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(render_err);
    }
    writer.write_event(Event::Start(start)).map_err(render_err)?;
    for child in &element.children {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::CData(text) => write_cdata(writer, text)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(render_err)
}

/// Writes text as one or more adjacent CDATA sections, splitting around the
/// `]]>` terminator so the literal characters survive.
fn write_cdata(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), RenderError> {
    let mut rest = text;
    while let Some(position) = rest.find("]]>") {
        let (chunk, tail) = rest.split_at(position + 2);
        writer
            .write_event(Event::CData(BytesCData::new(chunk)))
            .map_err(render_err)?;
        rest = tail;
    }
    writer
        .write_event(Event::CData(BytesCData::new(rest)))
        .map_err(render_err)
}
