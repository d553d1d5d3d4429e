use crate::node::{Node, NodeId, ScanTree};
use crate::types::{DataType, FieldKind, FieldMapping, InputType, Validation};

/// Everything known about a field except its name and selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTraits {
    pub kind: FieldKind,
    pub input_type: Option<InputType>,
    pub required: bool,
    pub data_type: DataType,
    pub validation: Option<Validation>,
    pub options: Option<Vec<String>>,
}

impl FieldTraits {
    /// Traits with no input type, validation or options
    #[must_use]
    pub const fn new(kind: FieldKind, data_type: DataType, required: bool) -> Self {
        Self {
            kind,
            input_type: None,
            required,
            data_type,
            validation: None,
            options: None,
        }
    }

    /// Builder: set options
    #[must_use]
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    /// Attach a name and selector
    #[must_use]
    pub fn into_mapping(self, name: String, selector: String) -> FieldMapping {
        FieldMapping {
            name,
            selector,
            kind: self.kind,
            input_type: self.input_type,
            required: self.required,
            data_type: self.data_type,
            validation: self.validation,
            options: self.options,
        }
    }
}

/// Native tags, in scan pass order
pub const NATIVE_TAGS: [&str; 3] = ["input", "textarea", "select"];

/// Classify an `input`, `textarea` or `select`; `None` for anything else
#[must_use]
pub fn classify_native(tree: &ScanTree<'_>, id: NodeId) -> Option<FieldTraits> {
    let node = tree.node(id);
    let tag = node.tag().to_ascii_lowercase();
    match tag.as_str() {
        "input" => Some(classify_input(node)),
        "textarea" => Some(FieldTraits::new(
            FieldKind::NativeTextarea,
            DataType::String,
            is_required(node),
        )),
        "select" => Some(
            FieldTraits::new(FieldKind::NativeSelect, DataType::String, is_required(node))
                .with_options(select_options(tree, id)),
        ),
        _ => None,
    }
}

fn classify_input(node: &dyn Node) -> FieldTraits {
    let input_type = InputType::from_attribute(node.attribute("type"));
    let mut traits = FieldTraits::new(
        FieldKind::NativeInput,
        input_type.data_type(),
        is_required(node),
    );
    if input_type == InputType::Email {
        traits.validation = Some(Validation::email());
    }
    traits.input_type = Some(input_type);
    traits
}

/// `required` attribute, or an `aria-required` flag not set to `false`
#[must_use]
pub fn is_required(node: &dyn Node) -> bool {
    node.has_attribute("required")
        || node
            .attribute("aria-required")
            .is_some_and(|flag| !flag.trim().eq_ignore_ascii_case("false"))
}

/// `data-required` marker on a widget container
#[must_use]
pub fn has_required_marker(node: &dyn Node) -> bool {
    node.has_attribute("data-required")
}

/// Display text of each `option`, falling back to its `value`
#[must_use]
pub fn select_options(tree: &ScanTree<'_>, id: NodeId) -> Vec<String> {
    tree.descendants(id)
        .map(|option| tree.node(option))
        .filter(|option| option.is_tag("option"))
        .filter_map(|option| {
            non_empty(option.text_content()).or_else(|| {
                option
                    .non_empty_attribute("value")
                    .map(ToString::to_string)
            })
        })
        .collect()
}

/// Trimmed text, `None` when blank
pub(crate) fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
