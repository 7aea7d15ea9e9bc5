//! Document configuration.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```rust
//! use editor_marks::DocumentConfig;
//!
//! let config = DocumentConfig::from_json_str(r#"{ "tab_width": 4 }"#).unwrap();
//! assert_eq!(config.tab_width, 4);
//! assert_eq!(config.default_fold_level, 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Settings applied when a [`Document`](crate::document::Document) is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Fold level reported for lines a lexer has not set.
    pub default_fold_level: i32,
    /// Uniform tab width used where a line has no custom tab stop.
    pub tab_width: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_fold_level: 0,
            tab_width: 8,
        }
    }
}

impl DocumentConfig {
    /// Parse a config from JSON, filling missing keys with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.tab_width == 0 {
            return Err(DocumentError::ZeroTabWidth);
        }
        Ok(())
    }
}
