//! Field name inference.
//!
//! Native elements walk the chain: `name`/`id` attribute, `label[for]`,
//! preceding sibling `<label>`, `placeholder`. Composite widgets use their
//! `data-field` marker, then the first label or heading found around them.
//! Only identifiers are kept verbatim; every text source is normalized.

use crate::node::{Node, NodeId, ScanTree};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("slug filter is valid"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Turn free text into a field slug.
///
/// Lower-cases, drops everything but `a-z`, `0-9` and whitespace, trims, then
/// joins the remaining words with `_`. Returns `None` when nothing survives.
#[must_use]
pub fn normalize_field_name(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let stripped = NON_SLUG.replace_all(&lowered, "");
    let slug = WHITESPACE_RUN.replace_all(stripped.trim(), "_");
    if slug.is_empty() {
        None
    } else {
        Some(slug.into_owned())
    }
}

/// Where a resolved name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// `name` or `id` attribute, verbatim
    Identifier,
    /// `<label for="...">` pointing at the element's id
    LabelFor,
    /// Nearest preceding sibling `<label>`
    PrecedingLabel,
    /// `placeholder` attribute
    Placeholder,
    /// `data-field` marker on a widget container, verbatim
    DataField,
    /// First label around a widget container
    ContextLabel,
    /// First heading-like element around a widget container
    ContextHeading,
}

/// A name plus the step of the chain that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub source: NameSource,
}

impl ResolvedName {
    fn new(name: impl Into<String>, source: NameSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// Applies the name fallback chains
pub struct NameResolver<'r> {
    label_scope: &'r dyn Node,
    heading_classes: &'r [String],
}

impl<'r> NameResolver<'r> {
    /// `label_scope` is the tree searched for `label[for]` associations
    pub fn new(label_scope: &'r dyn Node, heading_classes: &'r [String]) -> Self {
        Self {
            label_scope,
            heading_classes,
        }
    }

    /// Name for an `input`, `textarea` or `select`
    #[must_use]
    pub fn resolve_native(&self, tree: &ScanTree<'_>, id: NodeId) -> Option<ResolvedName> {
        let node = tree.node(id);

        if let Some(identifier) = verbatim_attribute(node, "name")
            .or_else(|| verbatim_attribute(node, "id"))
        {
            return Some(ResolvedName::new(identifier, NameSource::Identifier));
        }

        if let Some(element_id) = node.non_empty_attribute("id") {
            if let Some(name) = self
                .label_for(element_id)
                .and_then(|label| normalize_field_name(&label.text_content()))
            {
                return Some(ResolvedName::new(name, NameSource::LabelFor));
            }
        }

        if let Some(name) = tree
            .previous_siblings(id)
            .map(|sibling| tree.node(sibling))
            .filter(|sibling| sibling.is_tag("label"))
            .find_map(|label| normalize_field_name(&label.text_content()))
        {
            return Some(ResolvedName::new(name, NameSource::PrecedingLabel));
        }

        node.attribute("placeholder")
            .and_then(normalize_field_name)
            .map(|name| ResolvedName::new(name, NameSource::Placeholder))
    }

    /// Name for a composite widget container
    #[must_use]
    pub fn resolve_widget(&self, tree: &ScanTree<'_>, id: NodeId) -> Option<ResolvedName> {
        let node = tree.node(id);

        if let Some(marker) = verbatim_attribute(node, "data-field") {
            return Some(ResolvedName::new(marker, NameSource::DataField));
        }

        let context = tree.parent(id).unwrap_or(id);

        let label = tree
            .descendants(context)
            .map(|candidate| tree.node(candidate))
            .find(|candidate| candidate.is_tag("label"));
        if let Some(name) = label.and_then(|label| normalize_field_name(&label.text_content())) {
            return Some(ResolvedName::new(name, NameSource::ContextLabel));
        }

        tree.descendants(context)
            .map(|candidate| tree.node(candidate))
            .find(|candidate| self.is_heading(*candidate))
            .and_then(|heading| normalize_field_name(&heading.text_content()))
            .map(|name| ResolvedName::new(name, NameSource::ContextHeading))
    }

    /// First `<label for="element_id">` in the label scope
    #[must_use]
    pub fn label_for(&self, element_id: &str) -> Option<&'r dyn Node> {
        find_label_for(self.label_scope, element_id)
    }

    fn is_heading(&self, node: &dyn Node) -> bool {
        HEADING_TAGS.iter().any(|tag| node.is_tag(tag))
            || node
                .class_tokens()
                .iter()
                .any(|token| self.heading_classes.iter().any(|class| class == token))
    }
}

/// Untrimmed attribute value, unless it is blank
fn verbatim_attribute<'n>(node: &'n dyn Node, name: &str) -> Option<&'n str> {
    node.attribute(name).filter(|value| !value.trim().is_empty())
}

fn find_label_for<'n>(node: &'n dyn Node, element_id: &str) -> Option<&'n dyn Node> {
    if node.is_tag("label") && node.attribute("for").map(str::trim) == Some(element_id) {
        return Some(node);
    }
    node.children()
        .into_iter()
        .find_map(|child| find_label_for(child, element_id))
}
