//! Line-level markup handling
//!
//! Classifies raw lines against the configured markers, pulls the weight
//! value out of a weights block line, and splices a new value into the event
//! header line.

use crate::config::RewriterConfig;
use crate::types::{FormatError, Result};

/// What a raw input line means to the rewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opens an event record
    EventStart,
    /// Closes an event record
    EventEnd,
    /// Opens a weights block (either spelling)
    WeightsStart,
    /// Closes a weights block (either spelling)
    WeightsEnd,
    /// Anything else
    Content,
}

impl LineKind {
    /// Classify a line by prefix
    ///
    /// Matching is done on the untrimmed line, so indented markers are plain
    /// content. End markers take precedence over start markers.
    pub fn classify(line: &str, config: &RewriterConfig) -> Self {
        if line.starts_with(config.event_start.as_str()) {
            LineKind::EventStart
        } else if line.starts_with(config.event_end.as_str()) {
            LineKind::EventEnd
        } else if starts_with_any(line, &config.weights_end) {
            LineKind::WeightsEnd
        } else if starts_with_any(line, &config.weights_start) {
            LineKind::WeightsStart
        } else {
            LineKind::Content
        }
    }
}

fn starts_with_any(line: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| line.starts_with(p.as_str()))
}

/// Extract the weight value from a line inside a weights block
///
/// Returns `Ok(None)` for blank lines, which carry no weight. A line opening
/// the weight sub-tag must also close it; the value is the text between the
/// first `>` and the following `<`. Any other line is the value itself.
pub fn extract_weight(line: &str, config: &RewriterConfig, event: u64) -> Result<Option<String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if !trimmed.starts_with(config.weight_tag_open.as_str()) {
        return Ok(Some(trimmed.to_string()));
    }

    let malformed = || FormatError::MalformedWeight {
        event,
        line: trimmed.to_string(),
    };

    if !trimmed.contains(config.weight_tag_close.as_str()) {
        return Err(malformed().into());
    }

    let value = trimmed
        .split('>')
        .nth(1)
        .and_then(|inner| inner.split('<').next())
        .map(str::trim)
        .unwrap_or_default();

    if value.is_empty() {
        return Err(malformed().into());
    }

    Ok(Some(value.to_string()))
}

/// Replace one whitespace-separated field of the event header line
///
/// Whitespace runs collapse to single spaces and the line is rebuilt with a
/// single trailing newline. Returns the new line and the replaced value.
pub fn rewrite_header(
    line: &str,
    new_value: &str,
    field: usize,
    event: u64,
) -> Result<(String, String)> {
    let mut fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() <= field {
        return Err(FormatError::HeaderTooShort {
            event,
            found: fields.len(),
            required: field,
        }
        .into());
    }

    let old_value = fields[field].to_string();
    fields[field] = new_value;

    let mut rebuilt = fields.join(" ");
    rebuilt.push('\n');
    Ok((rebuilt, old_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RewriteError;

    #[test]
    fn test_classify_markers() {
        let config = RewriterConfig::new();
        assert_eq!(LineKind::classify("<event>\n", &config), LineKind::EventStart);
        assert_eq!(LineKind::classify("</event>\n", &config), LineKind::EventEnd);
        assert_eq!(LineKind::classify("<weights>\n", &config), LineKind::WeightsStart);
        assert_eq!(LineKind::classify("<rwgt>\n", &config), LineKind::WeightsStart);
        assert_eq!(LineKind::classify("</weights>\n", &config), LineKind::WeightsEnd);
        assert_eq!(LineKind::classify("</rwgt>\n", &config), LineKind::WeightsEnd);
        assert_eq!(LineKind::classify("1.23\n", &config), LineKind::Content);
    }

    #[test]
    fn test_classify_requires_marker_at_line_start() {
        let config = RewriterConfig::new();
        assert_eq!(LineKind::classify("  <weights>\n", &config), LineKind::Content);
        assert_eq!(LineKind::classify(" </event>\n", &config), LineKind::Content);
    }

    #[test]
    fn test_extract_bare_weight() {
        let config = RewriterConfig::new();
        let value = extract_weight("  1.23  \n", &config, 1).unwrap();
        assert_eq!(value.as_deref(), Some("1.23"));
    }

    #[test]
    fn test_extract_tagged_weight() {
        let config = RewriterConfig::new();
        let value = extract_weight("<wgt id='2'> 1.23 </wgt>\n", &config, 1).unwrap();
        assert_eq!(value.as_deref(), Some("1.23"));

        let value = extract_weight("   <wgt id=\"1001\">-4.5e+02</wgt>\n", &config, 1).unwrap();
        assert_eq!(value.as_deref(), Some("-4.5e+02"));
    }

    #[test]
    fn test_extract_unclosed_tag_is_malformed() {
        let config = RewriterConfig::new();
        let err = extract_weight("<wgt id='2'>1.23\n", &config, 4).unwrap_err();
        match err {
            RewriteError::Format(FormatError::MalformedWeight { event, line }) => {
                assert_eq!(event, 4);
                assert_eq!(line, "<wgt id='2'>1.23");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_extract_empty_tag_is_malformed() {
        let config = RewriterConfig::new();
        assert!(extract_weight("<wgt id='2'></wgt>\n", &config, 1).is_err());
    }

    #[test]
    fn test_extract_blank_line_has_no_weight() {
        let config = RewriterConfig::new();
        assert_eq!(extract_weight("   \n", &config, 1).unwrap(), None);
    }

    #[test]
    fn test_rewrite_header_collapses_whitespace() {
        let (line, old) = rewrite_header("  1  2   3.5   4\n", "1.23", 2, 1).unwrap();
        assert_eq!(line, "1 2 1.23 4\n");
        assert_eq!(old, "3.5");
    }

    #[test]
    fn test_rewrite_header_handles_tabs_and_crlf() {
        let (line, old) = rewrite_header("5\t10001 +2.0E+00\t0.1\r\n", "7.0", 2, 1).unwrap();
        assert_eq!(line, "5 10001 7.0 0.1\n");
        assert_eq!(old, "+2.0E+00");
    }

    #[test]
    fn test_rewrite_header_too_short() {
        let err = rewrite_header("1 2\n", "1.23", 2, 9).unwrap_err();
        assert!(matches!(
            err,
            RewriteError::Format(FormatError::HeaderTooShort {
                event: 9,
                found: 2,
                required: 2
            })
        ));
    }
}
