use serde::{Deserialize, Serialize};
use std::fmt;

/// Pattern attached to `type="email"` inputs.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// One discoverable field in an editing panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name, verbatim from `name`/`id`/`data-field` or a normalized slug
    pub name: String,

    /// Expression that relocates the originating element
    pub selector: String,

    /// Structural kind of the field
    pub kind: FieldKind,

    /// Normalized `type` attribute, native inputs only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,

    /// Whether the panel marks the field as mandatory
    pub required: bool,

    /// Shape of the value the field holds
    pub data_type: DataType,

    /// Pattern the value must match, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,

    /// Enumerable choices in document order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldMapping {
    /// Create a mapping with no input type, validation or options
    pub fn new(
        name: impl Into<String>,
        selector: impl Into<String>,
        kind: FieldKind,
        data_type: DataType,
    ) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            kind,
            input_type: None,
            required: false,
            data_type,
            validation: None,
            options: None,
        }
    }

    /// Builder: set required flag
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Builder: set input type
    #[must_use]
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = Some(input_type);
        self
    }

    /// Builder: set validation
    #[must_use]
    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Builder: set options
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

/// Structural kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `<input>` of any type
    NativeInput,
    /// `<textarea>`
    NativeTextarea,
    /// `<select>`
    NativeSelect,
    /// Container of buttons acting as a single choice
    ButtonGroup,
    /// Container explicitly marked as a multi-select
    MultiSelectMarker,
    /// Container of several checkboxes acting as one field
    CheckboxList,
}

impl FieldKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NativeInput => "native_input",
            Self::NativeTextarea => "native_textarea",
            Self::NativeSelect => "native_select",
            Self::ButtonGroup => "button_group",
            Self::MultiSelectMarker => "multi_select_marker",
            Self::CheckboxList => "checkbox_list",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    String,
    Number,
    Boolean,
    ArrayOfString,
}

/// Normalized `type` attribute of a native input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputType {
    Text,
    Email,
    Password,
    Url,
    Number,
    Checkbox,
    Radio,
    /// Any other type, lower-cased
    Other(String),
}

impl InputType {
    /// Parse a raw `type` attribute; missing or blank means `text`
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let value = raw.map(str::trim).unwrap_or_default().to_lowercase();
        match value.as_str() {
            "" | "text" => Self::Text,
            "email" => Self::Email,
            "password" => Self::Password,
            "url" => Self::Url,
            "number" => Self::Number,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            _ => Self::Other(value),
        }
    }

    /// Get the attribute spelling
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Url => "url",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Other(value) => value,
        }
    }

    /// Value shape held by an input of this type
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Number => DataType::Number,
            Self::Checkbox => DataType::Boolean,
            _ => DataType::String,
        }
    }
}

impl From<String> for InputType {
    fn from(value: String) -> Self {
        Self::from_attribute(Some(&value))
    }
}

impl From<InputType> for String {
    fn from(value: InputType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pattern a field value must match
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Validation {
    pattern: String,
}

impl Validation {
    /// The fixed email pattern
    #[must_use]
    pub fn email() -> Self {
        Self {
            pattern: EMAIL_PATTERN.to_string(),
        }
    }
}
