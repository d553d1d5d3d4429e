use crate::error::{MapperError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventions the scanner uses to recognize composite widgets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// Containers acting as a single-choice button group
    pub button_group: WidgetConvention,

    /// Containers explicitly marked as multi-selects
    pub multi_select: WidgetConvention,

    /// Containers that may hold a list of checkboxes
    pub checkbox_list: WidgetConvention,

    /// A checkbox list needs at least this many checkbox descendants
    pub min_checkboxes: usize,

    /// Class tokens that make an element heading-like, besides `h1`-`h6`
    pub heading_classes: Vec<String>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            button_group: WidgetConvention {
                classes: vec!["btn-group".to_string(), "button-group".to_string()],
                roles: vec!["radiogroup".to_string()],
                attributes: vec![],
            },
            multi_select: WidgetConvention {
                classes: vec!["multi-select".to_string()],
                roles: vec![],
                attributes: vec!["data-multi-select".to_string()],
            },
            checkbox_list: WidgetConvention {
                classes: vec!["checkbox-list".to_string()],
                roles: vec!["group".to_string()],
                attributes: vec![],
            },
            min_checkboxes: 2,
            heading_classes: vec!["field-label".to_string()],
        }
    }
}

impl MapperConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (label, convention) in [
            ("button_group", &self.button_group),
            ("multi_select", &self.multi_select),
            ("checkbox_list", &self.checkbox_list),
        ] {
            if convention.is_empty() {
                return Err(MapperError::invalid_config(format!(
                    "{label} must list at least one class, role or attribute"
                )));
            }
            if let Some(blank) = convention.blank_entry() {
                return Err(MapperError::invalid_config(format!(
                    "{label} contains a blank {blank} entry"
                )));
            }
        }

        if self.min_checkboxes < 2 {
            return Err(MapperError::invalid_config(format!(
                "min_checkboxes ({}) must be at least 2",
                self.min_checkboxes
            )));
        }

        if self.heading_classes.iter().any(|class| class.trim().is_empty()) {
            return Err(MapperError::invalid_config(
                "heading_classes contains a blank entry",
            ));
        }

        Ok(())
    }
}

/// Structural markers identifying one widget family.
///
/// A container matches when it carries any listed class token, any listed
/// `role`, or any listed attribute.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConvention {
    pub classes: Vec<String>,
    pub roles: Vec<String>,
    pub attributes: Vec<String>,
}

impl WidgetConvention {
    fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.roles.is_empty() && self.attributes.is_empty()
    }

    fn blank_entry(&self) -> Option<&'static str> {
        let blank = |entries: &[String]| entries.iter().any(|e| e.trim().is_empty());
        if blank(&self.classes) {
            Some("class")
        } else if blank(&self.roles) {
            Some("role")
        } else if blank(&self.attributes) {
            Some("attribute")
        } else {
            None
        }
    }
}
