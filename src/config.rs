//! Loader configuration.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::Result;

/// Header token expected in the first column of a rating table.
pub const DEFAULT_HEADER_MARKER: &str = "Rating";

/// Options controlling how a rating table is read.
///
/// ```json
/// {
///   "header_marker": "Rating",
///   "label_vocabulary": ["-2", "-1", "0", "+1", "+2"],
///   "report_unexpected_tokens": true
/// }
/// ```
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Literal the first header token must equal.
    pub header_marker: String,
    /// Known label tokens. Labels outside it are logged, never rejected.
    pub label_vocabulary: Option<BTreeSet<String>>,
    /// Log feature tokens that are neither `y` nor `n`.
    pub report_unexpected_tokens: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header_marker: DEFAULT_HEADER_MARKER.to_string(),
            label_vocabulary: None,
            report_unexpected_tokens: true,
        }
    }
}

impl LoadOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.header_marker = marker.into();
        self
    }

    pub fn with_label_vocabulary<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_vocabulary = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_report_unexpected_tokens(mut self, report: bool) -> Self {
        self.report_unexpected_tokens = report;
        self
    }

    /// Whether `label` is acceptable under the configured vocabulary.
    pub(crate) fn label_known(&self, label: &str) -> bool {
        self.label_vocabulary
            .as_ref()
            .map_or(true, |vocab| vocab.contains(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = LoadOptions::default();
        assert_eq!(opts.header_marker, "Rating");
        assert!(opts.label_vocabulary.is_none());
        assert!(opts.report_unexpected_tokens);
        assert!(opts.label_known("anything"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let opts = LoadOptions::from_json_str(r#"{ "label_vocabulary": ["0", "+1"] }"#).unwrap();
        assert_eq!(opts.header_marker, "Rating");
        assert!(opts.label_known("+1"));
        assert!(!opts.label_known("-1"));
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(LoadOptions::from_json_str("{ not json").is_err());
    }

    #[test]
    fn builders() {
        let opts = LoadOptions::default()
            .with_header_marker("Label")
            .with_report_unexpected_tokens(false)
            .with_label_vocabulary(["a"]);
        assert_eq!(opts.header_marker, "Label");
        assert!(!opts.report_unexpected_tokens);
        assert!(opts.label_known("a"));
    }
}
