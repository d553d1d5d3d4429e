//! Re-locatable element references.
//!
//! Generation walks a fixed priority chain (`#id`, `[name]`, `[data-field]`,
//! first long class token, `tag:nth-of-type(n)`) and never fails. The same
//! five forms can be parsed back and evaluated against a tree, which is how an
//! automation pass finds the field again at fill time.
//!
//! Attribute values are compared after trimming, the same way they are read
//! during generation.

use crate::error::{MapperError, Result};
use crate::node::{Node, NodeId, ScanTree};
use std::fmt;

/// Class tokens this short are too generic to identify anything
const MIN_CLASS_TOKEN_LEN: usize = 3;

const NTH_OF_TYPE: &str = ":nth-of-type(";

/// Parsed form of a generated selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `[name="..."]`
    Name(String),
    /// `[data-field="..."]`
    DataField(String),
    /// `.token`
    Class(String),
    /// `tag:nth-of-type(n)`, 1-based
    NthOfType { tag: String, index: usize },
}

impl Selector {
    /// Build the most durable selector available for an element
    #[must_use]
    pub fn generate(tree: &ScanTree<'_>, id: NodeId) -> Self {
        let node = tree.node(id);

        if let Some(value) = node.non_empty_attribute("id") {
            return Self::Id(value.to_string());
        }
        if let Some(value) = node.non_empty_attribute("name") {
            return Self::Name(value.to_string());
        }
        if let Some(value) = node.non_empty_attribute("data-field") {
            return Self::DataField(value.to_string());
        }
        if let Some(token) = node
            .class_tokens()
            .into_iter()
            .find(|token| token.chars().count() >= MIN_CLASS_TOKEN_LEN)
        {
            return Self::Class(token.to_string());
        }

        Self::NthOfType {
            tag: node.tag().to_ascii_lowercase(),
            index: tree.nth_of_type(id),
        }
    }

    /// Parse one of the generated forms
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let invalid = |reason: &str| MapperError::invalid_selector(text, reason);

        if let Some(id) = text.strip_prefix('#') {
            if id.is_empty() {
                return Err(invalid("empty id"));
            }
            return Ok(Self::Id(id.to_string()));
        }

        if let Some(class) = text.strip_prefix('.') {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(invalid("class selector must be a single token"));
            }
            return Ok(Self::Class(class.to_string()));
        }

        if let Some(inner) = text.strip_prefix('[') {
            let inner = inner
                .strip_suffix(']')
                .ok_or_else(|| invalid("unterminated attribute selector"))?;
            let (attribute, quoted) = inner
                .split_once('=')
                .ok_or_else(|| invalid("attribute selector needs a value"))?;
            let value = unquote(quoted).ok_or_else(|| invalid("value must be double-quoted"))?;
            return match attribute.trim() {
                "name" => Ok(Self::Name(value)),
                "data-field" => Ok(Self::DataField(value)),
                other => Err(invalid(&format!("unsupported attribute `{other}`"))),
            };
        }

        let (tag, rest) = text
            .split_once(NTH_OF_TYPE)
            .ok_or_else(|| invalid("unrecognized selector form"))?;
        if tag.is_empty()
            || tag.starts_with([':', '#', '.', '['])
            || tag.chars().any(char::is_whitespace)
        {
            return Err(invalid("positional selector needs a tag name"));
        }
        let index = rest
            .strip_suffix(')')
            .and_then(|n| n.trim().parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .ok_or_else(|| invalid("nth-of-type index must be a positive integer"))?;

        Ok(Self::NthOfType {
            tag: tag.to_ascii_lowercase(),
            index,
        })
    }

    /// Check whether an indexed element matches
    #[must_use]
    pub fn matches(&self, tree: &ScanTree<'_>, id: NodeId) -> bool {
        let node = tree.node(id);
        match self {
            Self::Id(value) => node.non_empty_attribute("id") == Some(value.as_str()),
            Self::Name(value) => node.non_empty_attribute("name") == Some(value.as_str()),
            Self::DataField(value) => {
                node.non_empty_attribute("data-field") == Some(value.as_str())
            }
            Self::Class(token) => node.class_tokens().contains(&token.as_str()),
            Self::NthOfType { tag, index } => node.is_tag(tag) && tree.nth_of_type(id) == *index,
        }
    }

    /// Every element below the tree root that matches, in document order
    #[must_use]
    pub fn select_all(&self, tree: &ScanTree<'_>) -> Vec<NodeId> {
        tree.elements().filter(|id| self.matches(tree, *id)).collect()
    }

    /// Check if the selector depends on sibling order
    #[must_use]
    pub const fn is_positional(&self) -> bool {
        matches!(self, Self::NthOfType { .. })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(value) => write!(f, "#{value}"),
            Self::Name(value) => write!(f, "[name=\"{}\"]", escape(value)),
            Self::DataField(value) => write!(f, "[data-field=\"{}\"]", escape(value)),
            Self::Class(token) => write!(f, ".{token}"),
            Self::NthOfType { tag, index } => write!(f, "{tag}{NTH_OF_TYPE}{index})"),
        }
    }
}

/// Find every element below `root` matching `selector`
pub fn resolve<'a>(root: &'a dyn Node, selector: &str) -> Result<Vec<&'a dyn Node>> {
    let selector = Selector::parse(selector)?;
    let tree = ScanTree::build(root);
    Ok(selector
        .select_all(&tree)
        .into_iter()
        .map(|id| tree.node(id))
        .collect())
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.trim().strip_prefix('"')?.strip_suffix('"')?;
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => value.push(chars.next()?),
            '"' => return None,
            _ => value.push(c),
        }
    }
    Some(value)
}
