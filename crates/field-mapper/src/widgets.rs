//! Composite widget recognition.
//!
//! A composite widget is a container that behaves as one logical field. Each
//! family is a [`WidgetMatcher`]; the scanner runs the matchers of a
//! [`WidgetRegistry`] in registration order, so new conventions plug in
//! without touching the scan loop.

use crate::classify::{has_required_marker, non_empty, FieldTraits};
use crate::config::{MapperConfig, WidgetConvention};
use crate::node::{Node, NodeId, ScanTree};
use crate::types::{DataType, FieldKind, InputType};

/// Recognizes one family of composite widgets
pub trait WidgetMatcher: Send + Sync {
    /// Kind emitted for matched containers
    fn kind(&self) -> FieldKind;

    /// Traits of the container at `id`, or `None` if it is not this widget
    fn classify(&self, tree: &ScanTree<'_>, id: NodeId) -> Option<FieldTraits>;
}

impl WidgetConvention {
    /// Check whether a container carries any of the markers
    #[must_use]
    pub fn matches(&self, node: &dyn Node) -> bool {
        let tokens = node.class_tokens();
        if self.classes.iter().any(|class| tokens.contains(&class.as_str())) {
            return true;
        }
        if let Some(role) = node.attribute("role") {
            let role = role.trim().to_ascii_lowercase();
            if self.roles.iter().any(|r| r.eq_ignore_ascii_case(&role)) {
                return true;
            }
        }
        self.attributes.iter().any(|attr| node.has_attribute(attr))
    }
}

/// Single choice expressed as a row of buttons
#[derive(Debug, Clone)]
pub struct ButtonGroupMatcher {
    convention: WidgetConvention,
}

impl ButtonGroupMatcher {
    pub fn new(convention: WidgetConvention) -> Self {
        Self { convention }
    }
}

impl WidgetMatcher for ButtonGroupMatcher {
    fn kind(&self) -> FieldKind {
        FieldKind::ButtonGroup
    }

    fn classify(&self, tree: &ScanTree<'_>, id: NodeId) -> Option<FieldTraits> {
        let node = tree.node(id);
        if !self.convention.matches(node) {
            return None;
        }

        let options = tree
            .descendants(id)
            .map(|button| tree.node(button))
            .filter(|button| button.is_tag("button"))
            .filter_map(|button| non_empty(button.text_content()))
            .collect();

        Some(
            FieldTraits::new(self.kind(), DataType::String, has_required_marker(node))
                .with_options(options),
        )
    }
}

/// Container explicitly marked as a multi-select.
///
/// Options stay empty: the choice set is usually rendered lazily, so the
/// caller enumerates it at fill time.
#[derive(Debug, Clone)]
pub struct MultiSelectMatcher {
    convention: WidgetConvention,
}

impl MultiSelectMatcher {
    pub fn new(convention: WidgetConvention) -> Self {
        Self { convention }
    }
}

impl WidgetMatcher for MultiSelectMatcher {
    fn kind(&self) -> FieldKind {
        FieldKind::MultiSelectMarker
    }

    fn classify(&self, tree: &ScanTree<'_>, id: NodeId) -> Option<FieldTraits> {
        let node = tree.node(id);
        self.convention.matches(node).then(|| {
            FieldTraits::new(
                self.kind(),
                DataType::ArrayOfString,
                has_required_marker(node),
            )
        })
    }
}

/// Container holding several checkboxes that together form one field
#[derive(Debug, Clone)]
pub struct CheckboxListMatcher {
    convention: WidgetConvention,
    min_checkboxes: usize,
}

impl CheckboxListMatcher {
    pub fn new(convention: WidgetConvention, min_checkboxes: usize) -> Self {
        Self {
            convention,
            min_checkboxes,
        }
    }
}

impl WidgetMatcher for CheckboxListMatcher {
    fn kind(&self) -> FieldKind {
        FieldKind::CheckboxList
    }

    fn classify(&self, tree: &ScanTree<'_>, id: NodeId) -> Option<FieldTraits> {
        let node = tree.node(id);
        if !self.convention.matches(node) {
            return None;
        }

        let checkboxes: Vec<NodeId> = tree
            .descendants(id)
            .filter(|candidate| is_checkbox(tree.node(*candidate)))
            .collect();
        if checkboxes.len() < self.min_checkboxes {
            return None;
        }

        let options = checkboxes
            .into_iter()
            .filter_map(|checkbox| checkbox_label(tree, checkbox))
            .collect();

        Some(
            FieldTraits::new(
                self.kind(),
                DataType::ArrayOfString,
                has_required_marker(node),
            )
            .with_options(options),
        )
    }
}

fn is_checkbox(node: &dyn Node) -> bool {
    node.is_tag("input") && InputType::from_attribute(node.attribute("type")) == InputType::Checkbox
}

/// Text of the element right after the checkbox, else its `value`
fn checkbox_label(tree: &ScanTree<'_>, checkbox: NodeId) -> Option<String> {
    tree.next_sibling(checkbox)
        .and_then(|label| non_empty(tree.node(label).text_content()))
        .or_else(|| {
            tree.node(checkbox)
                .non_empty_attribute("value")
                .map(ToString::to_string)
        })
}

/// Ordered set of widget matchers
pub struct WidgetRegistry {
    matchers: Vec<Box<dyn WidgetMatcher>>,
}

impl WidgetRegistry {
    /// Registry with no matchers
    #[must_use]
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Button groups, multi-selects and checkbox lists, in that order
    #[must_use]
    pub fn from_config(config: &MapperConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(ButtonGroupMatcher::new(config.button_group.clone()));
        registry.register(MultiSelectMatcher::new(config.multi_select.clone()));
        registry.register(CheckboxListMatcher::new(
            config.checkbox_list.clone(),
            config.min_checkboxes,
        ));
        registry
    }

    /// Append a matcher; it runs after the ones already registered
    pub fn register(&mut self, matcher: impl WidgetMatcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn WidgetMatcher> {
        self.matchers.iter().map(|matcher| &**matcher)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::from_config(&MapperConfig::default())
    }
}
