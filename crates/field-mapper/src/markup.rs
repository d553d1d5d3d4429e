//! Owned in-memory element tree.
//!
//! Used for fixtures and by callers that hold markup as text. Parsing accepts
//! well-formed (XHTML-style) markup only: void elements must be self-closed and
//! boolean attributes need a value (`required=""`).

use crate::error::Result;
use crate::node::Node;
use std::path::Path;

/// Element child: nested element or raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Element(Element),
    Text(String),
}

/// One element with its attributes and mixed content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    content: Vec<Content>,
}

impl Element {
    /// Create an empty element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Builder: set an attribute, replacing an existing value
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Builder: append a child element
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.content.push(Content::Element(child));
        self
    }

    /// Builder: append several child elements
    #[must_use]
    pub fn with_children<I: IntoIterator<Item = Element>>(mut self, children: I) -> Self {
        self.content
            .extend(children.into_iter().map(Content::Element));
        self
    }

    /// Builder: append a text run
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content.push(Content::Text(text.into()));
        self
    }

    /// Parse well-formed markup; the document element becomes the root
    pub fn parse(markup: &str) -> Result<Self> {
        let document = roxmltree::Document::parse(markup)?;
        Ok(Self::from_xml(document.root_element()))
    }

    /// Read and parse a markup file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let markup = std::fs::read_to_string(path)?;
        Self::parse(&markup)
    }

    fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        let mut element = Self::new(node.tag_name().name());
        for attribute in node.attributes() {
            element = element.attr(attribute.name(), attribute.value());
        }
        for child in node.children() {
            if child.is_element() {
                element.content.push(Content::Element(Self::from_xml(child)));
            } else if let Some(text) = child.text().filter(|_| child.is_text()) {
                element.content.push(Content::Text(text.to_string()));
            }
        }
        element
    }

    /// Mixed content in document order
    #[must_use]
    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Attributes in declaration order
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    fn collect_text(&self, out: &mut String) {
        for item in &self.content {
            match item {
                Content::Element(child) => child.collect_text(out),
                Content::Text(text) => out.push_str(text),
            }
        }
    }
}

impl Node for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.content
            .iter()
            .filter_map(|item| match item {
                Content::Element(child) => Some(child as &dyn Node),
                Content::Text(_) => None,
            })
            .collect()
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }
}
