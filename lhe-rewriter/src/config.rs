//! Rewriter configuration types
//!
//! The markers recognized in the event-record file and the naming scheme for
//! the derived output file. Defaults match the Les Houches event format as
//! written by POWHEG; every field can be overridden from a config file.

use crate::types::{Result, RewriteError};
use serde::{Deserialize, Serialize};

/// Markers and field position used by the rewriter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriterConfig {
    /// Line prefix opening an event record
    #[serde(default = "default_event_start")]
    pub event_start: String,

    /// Line prefix closing an event record
    #[serde(default = "default_event_end")]
    pub event_end: String,

    /// Accepted line prefixes opening a weights block
    #[serde(default = "default_weights_start")]
    pub weights_start: Vec<String>,

    /// Accepted line prefixes closing a weights block
    #[serde(default = "default_weights_end")]
    pub weights_end: Vec<String>,

    /// Opening syntax of the labelled weight sub-tag
    #[serde(default = "default_weight_tag_open")]
    pub weight_tag_open: String,

    /// Closing syntax of the labelled weight sub-tag
    #[serde(default = "default_weight_tag_close")]
    pub weight_tag_close: String,

    /// Zero-based index of the generator weight (XWGTUP) in the header line
    #[serde(default = "default_header_field")]
    pub header_field: usize,
}

fn default_event_start() -> String {
    "<event>".to_string()
}

fn default_event_end() -> String {
    "</event>".to_string()
}

fn default_weights_start() -> Vec<String> {
    vec!["<weights>".to_string(), "<rwgt>".to_string()]
}

fn default_weights_end() -> Vec<String> {
    vec!["</weights>".to_string(), "</rwgt>".to_string()]
}

fn default_weight_tag_open() -> String {
    "<wgt".to_string()
}

fn default_weight_tag_close() -> String {
    "</wgt>".to_string()
}

fn default_header_field() -> usize {
    2
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            event_start: default_event_start(),
            event_end: default_event_end(),
            weights_start: default_weights_start(),
            weights_end: default_weights_end(),
            weight_tag_open: default_weight_tag_open(),
            weight_tag_close: default_weight_tag_close(),
            header_field: default_header_field(),
        }
    }
}

impl RewriterConfig {
    /// Create a configuration with the standard LHE markers
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the event start/end markers
    pub fn with_event_markers(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.event_start = start.into();
        self.event_end = end.into();
        self
    }

    /// Builder method: accept an additional weights block spelling
    pub fn add_weights_markers(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.weights_start.push(start.into());
        self.weights_end.push(end.into());
        self
    }

    /// Builder method: set the weight sub-tag syntax
    pub fn with_weight_tag(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.weight_tag_open = open.into();
        self.weight_tag_close = close.into();
        self
    }

    /// Builder method: set the header field to overwrite
    pub fn with_header_field(mut self, field: usize) -> Self {
        self.header_field = field;
        self
    }

    /// Reject configurations that could never match a record
    pub fn validate(&self) -> Result<()> {
        let singles = [
            ("event_start", &self.event_start),
            ("event_end", &self.event_end),
            ("weight_tag_open", &self.weight_tag_open),
            ("weight_tag_close", &self.weight_tag_close),
        ];
        for (name, marker) in singles {
            if marker.is_empty() {
                return Err(RewriteError::Config(format!("{} must not be empty", name)));
            }
        }

        let lists = [
            ("weights_start", &self.weights_start),
            ("weights_end", &self.weights_end),
        ];
        for (name, markers) in lists {
            if markers.is_empty() {
                return Err(RewriteError::Config(format!(
                    "{} needs at least one spelling",
                    name
                )));
            }
            if markers.iter().any(|m| m.is_empty()) {
                return Err(RewriteError::Config(format!(
                    "{} contains an empty spelling",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Naming scheme for the derived output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputNaming {
    /// Event-record file extension, including the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Suffix inserted before the extension
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_extension() -> String {
    ".lhe".to_string()
}

fn default_suffix() -> String {
    "_weighted".to_string()
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            suffix: default_suffix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers() {
        let config = RewriterConfig::new();
        assert_eq!(config.event_start, "<event>");
        assert_eq!(config.event_end, "</event>");
        assert_eq!(config.weights_start, vec!["<weights>", "<rwgt>"]);
        assert_eq!(config.weights_end, vec!["</weights>", "</rwgt>"]);
        assert_eq!(config.header_field, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RewriterConfig::new()
            .with_event_markers("<ev>", "</ev>")
            .add_weights_markers("<mgrwt>", "</mgrwt>")
            .with_weight_tag("<w", "</w>")
            .with_header_field(3);

        assert_eq!(config.event_start, "<ev>");
        assert_eq!(config.weights_start.len(), 3);
        assert_eq!(config.weights_end.last().map(String::as_str), Some("</mgrwt>"));
        assert_eq!(config.weight_tag_close, "</w>");
        assert_eq!(config.header_field, 3);
    }

    #[test]
    fn test_validate_rejects_empty_markers() {
        let config = RewriterConfig::new().with_event_markers("", "</event>");
        assert!(matches!(config.validate(), Err(RewriteError::Config(_))));

        let mut config = RewriterConfig::new();
        config.weights_end.clear();
        assert!(matches!(config.validate(), Err(RewriteError::Config(_))));

        let config = RewriterConfig::new().add_weights_markers("<x>", "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RewriterConfig = toml::from_str(r#"weights_start = ["<weights>"]"#).unwrap();
        assert_eq!(config.weights_start, vec!["<weights>"]);
        assert_eq!(config.weights_end, vec!["</weights>", "</rwgt>"]);
        assert_eq!(config.event_start, "<event>");

        let naming: OutputNaming = toml::from_str(r#"suffix = "_rw""#).unwrap();
        assert_eq!(naming.suffix, "_rw");
        assert_eq!(naming.extension, ".lhe");
    }
}
