use crate::classify::{classify_native, FieldTraits, NATIVE_TAGS};
use crate::config::MapperConfig;
use crate::error::Result;
use crate::naming::{NameResolver, ResolvedName};
use crate::node::{Node, NodeId, ScanTree};
use crate::selector::Selector;
use crate::types::FieldMapping;
use crate::widgets::WidgetRegistry;
use std::collections::HashSet;

/// Discovers the fields of an editing panel
pub struct FieldScanner {
    config: MapperConfig,
    registry: WidgetRegistry,
}

impl FieldScanner {
    /// Create a scanner with the default widget matchers for `config`
    pub fn new(config: MapperConfig) -> Result<Self> {
        let registry = WidgetRegistry::from_config(&config);
        Self::with_registry(config, registry)
    }

    /// Create a scanner with a caller-assembled widget registry
    pub fn with_registry(config: MapperConfig, registry: WidgetRegistry) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    /// Widget matchers, for registering extra conventions
    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    /// Scan `root`; labels are looked up inside `root` only
    #[must_use]
    pub fn scan(&self, root: &dyn Node) -> Vec<FieldMapping> {
        self.scan_with_label_scope(root, root)
    }

    /// Scan `root`, resolving `label[for]` against `label_scope`.
    ///
    /// Pass the whole page as `label_scope` when the panel's labels may live
    /// outside the panel itself.
    #[must_use]
    pub fn scan_with_label_scope(
        &self,
        root: &dyn Node,
        label_scope: &dyn Node,
    ) -> Vec<FieldMapping> {
        let tree = ScanTree::build(root);
        let resolver = NameResolver::new(label_scope, &self.config.heading_classes);
        let mut pass = ScanPass::default();

        for tag in NATIVE_TAGS {
            for id in tree.elements_by_tag(tag) {
                if let Some(traits) = classify_native(&tree, id) {
                    let name = resolver.resolve_native(&tree, id);
                    pass.emit(&tree, id, traits, name);
                }
            }
        }

        for matcher in self.registry.iter() {
            for id in tree.elements() {
                if let Some(traits) = matcher.classify(&tree, id) {
                    let name = resolver.resolve_widget(&tree, id);
                    pass.emit(&tree, id, traits, name);
                }
            }
        }

        log::debug!(
            "Scanned <{}>: {} fields mapped, {} unnamed elements skipped",
            root.tag(),
            pass.fields.len(),
            pass.dropped
        );
        pass.fields
    }
}

impl Default for FieldScanner {
    fn default() -> Self {
        let config = MapperConfig::default();
        let registry = WidgetRegistry::from_config(&config);
        Self { config, registry }
    }
}

/// Scan a panel with the default conventions
#[must_use]
pub fn scan_modal_fields(root: &dyn Node) -> Vec<FieldMapping> {
    FieldScanner::default().scan(root)
}

#[derive(Default)]
struct ScanPass {
    fields: Vec<FieldMapping>,
    names: HashSet<String>,
    dropped: usize,
}

impl ScanPass {
    fn emit(
        &mut self,
        tree: &ScanTree<'_>,
        id: NodeId,
        traits: FieldTraits,
        name: Option<ResolvedName>,
    ) {
        let selector = Selector::generate(tree, id);
        let Some(resolved) = name else {
            log::debug!("Skipping unnamed {} at {selector}", traits.kind);
            self.dropped += 1;
            return;
        };

        let name = self.claim(resolved.name);
        if selector.is_positional() {
            log::debug!("Field `{name}` only has a positional selector {selector}");
        }
        log::trace!(
            "Mapped {} `{name}` at {selector} (name from {:?})",
            traits.kind,
            resolved.source
        );
        self.fields.push(traits.into_mapping(name, selector.to_string()));
    }

    /// Reserve a unique name, suffixing `_2`, `_3`, ... on collision
    fn claim(&mut self, name: String) -> String {
        if self.names.insert(name.clone()) {
            return name;
        }
        let unique = (2..)
            .map(|n| format!("{name}_{n}"))
            .find(|candidate| !self.names.contains(candidate))
            .unwrap_or_default();
        log::debug!("Field name `{name}` already taken, using `{unique}`");
        self.names.insert(unique.clone());
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Element;
    use crate::types::{DataType, FieldKind};
    use crate::widgets::WidgetMatcher;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pass_order_is_fixed() {
        let root = Element::new("div")
            .child(Element::new("select").attr("id", "s"))
            .child(
                Element::new("div")
                    .attr("class", "btn-group")
                    .attr("data-field", "b"),
            )
            .child(Element::new("textarea").attr("id", "t"))
            .child(Element::new("input").attr("id", "i"));

        let names: Vec<_> = scan_modal_fields(&root)
            .into_iter()
            .map(|field| field.name)
            .collect();
        assert_eq!(names, ["i", "t", "s", "b"]);
    }

    #[test]
    fn test_unnamed_elements_are_dropped() {
        let root = Element::new("div")
            .child(Element::new("input").attr("type", "text"))
            .child(Element::new("div").attr("class", "multi-select"))
            .child(Element::new("textarea").attr("placeholder", "Observações"));

        let fields = scan_modal_fields(&root);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "observaes");
        assert_eq!(fields[0].selector, "textarea:nth-of-type(1)");
    }

    #[test]
    fn test_duplicate_names_are_suffixed() {
        let root = Element::new("div")
            .child(Element::new("input").attr("type", "radio").attr("name", "nivel").attr("value", "1"))
            .child(Element::new("input").attr("type", "radio").attr("name", "nivel").attr("value", "2"))
            .child(Element::new("input").attr("name", "nivel_2"))
            .child(Element::new("textarea").attr("name", "nivel"));

        let names: Vec<_> = scan_modal_fields(&root)
            .into_iter()
            .map(|field| field.name)
            .collect();
        assert_eq!(names, ["nivel", "nivel_2", "nivel_2_2", "nivel_3"]);
    }

    #[test]
    fn test_root_is_not_a_candidate() {
        let root = Element::new("div")
            .attr("class", "btn-group")
            .attr("data-field", "root")
            .child(Element::new("button").text("A"));
        assert!(scan_modal_fields(&root).is_empty());
    }

    #[test]
    fn test_label_scope_reaches_outside_panel() {
        let page = Element::new("body")
            .child(Element::new("label").attr("for", "x").text("Fora"))
            .child(Element::new("div").child(Element::new("input").attr("id", "x")));
        let panel = match page.content()[1] {
            crate::markup::Content::Element(ref panel) => panel.clone(),
            crate::markup::Content::Text(_) => unreachable!(),
        };

        let scanner = FieldScanner::default();
        let inside = scanner.scan(&panel);
        let with_page = scanner.scan_with_label_scope(&panel, &page);
        // `id` wins either way; label scope only matters for the label step
        assert_eq!(inside, with_page);
        assert_eq!(inside[0].name, "x");
    }

    #[test]
    fn test_custom_matcher_registration() {
        struct StarRating;

        impl WidgetMatcher for StarRating {
            fn kind(&self) -> FieldKind {
                FieldKind::ButtonGroup
            }

            fn classify(&self, tree: &ScanTree<'_>, id: NodeId) -> Option<FieldTraits> {
                tree.node(id)
                    .class_tokens()
                    .contains(&"stars")
                    .then(|| FieldTraits::new(FieldKind::ButtonGroup, DataType::String, false))
            }
        }

        let root = Element::new("div")
            .child(Element::new("div").attr("class", "stars").attr("data-field", "nota"));

        let mut scanner = FieldScanner::default();
        assert!(scanner.scan(&root).is_empty());

        scanner.registry_mut().register(StarRating);
        let fields = scanner.scan(&root);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "nota");
        assert_eq!(fields[0].selector, "[data-field=\"nota\"]");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MapperConfig {
            min_checkboxes: 0,
            ..MapperConfig::default()
        };
        assert!(FieldScanner::new(config).is_err());
    }
}
