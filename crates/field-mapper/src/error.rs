use thiserror::Error;

/// Result type for mapper operations
pub type Result<T> = std::result::Result<T, MapperError>;

/// Errors raised at the fallible edges of the mapper.
///
/// Scanning itself never fails: unnamed elements are dropped and unstable
/// selectors degrade to positional ones. Only loading inputs can go wrong.
#[derive(Error, Debug)]
pub enum MapperError {
    /// Markup text is not well-formed
    #[error("Markup parse error: {0}")]
    MarkupParse(String),

    /// Selector text is not one of the generated forms
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be deserialized
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MapperError {
    /// Create a markup parse error
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::MarkupParse(msg.into())
    }

    /// Create an invalid selector error
    pub fn invalid_selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<roxmltree::Error> for MapperError {
    fn from(err: roxmltree::Error) -> Self {
        Self::MarkupParse(err.to_string())
    }
}
