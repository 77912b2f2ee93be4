//! Data model for rendered list rows.
//!
//! A `RenderedRow` holds the class tokens of one rendered list item; a
//! `RenderedOutput` is the ordered sequence of rows extracted from a single
//! rendered document. Both are read-only after construction: the verifier
//! never mutates its input.

use std::collections::BTreeSet;

/// One rendered list item, reduced to its class token set.
///
/// Class matching is exact token membership, never substring search, so
/// `views-row-10` does not satisfy a check for `views-row-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    classes: Option<BTreeSet<String>>,
    malformed_reason: Option<String>,
}

impl RenderedRow {
    /// Build a row from the raw value of a `class` attribute.
    ///
    /// The attribute is split on ASCII whitespace into discrete tokens; an
    /// all-whitespace attribute yields an empty token set (still well formed,
    /// the checks will simply fail).
    pub fn from_class_attr(attr: &str) -> Self {
        let classes = attr
            .split_ascii_whitespace()
            .map(|t| t.to_string())
            .collect::<BTreeSet<_>>();
        Self {
            classes: Some(classes),
            malformed_reason: None,
        }
    }

    /// Build a row from an iterator of already-split class tokens.
    pub fn from_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: Some(classes.into_iter().map(Into::into).collect()),
            malformed_reason: None,
        }
    }

    /// Mark a row whose class attribute was absent or unreadable.
    ///
    /// Malformed rows are reported per-row by the verifier without aborting
    /// the checks on the remaining rows.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            classes: None,
            malformed_reason: Some(reason.into()),
        }
    }

    /// The parsed token set, or `None` for a malformed row.
    pub fn classes(&self) -> Option<&BTreeSet<String>> {
        self.classes.as_ref()
    }

    /// Why this row is malformed, if it is.
    pub fn malformed_reason(&self) -> Option<&str> {
        self.malformed_reason.as_deref()
    }

    /// Exact token membership test. Always `false` on a malformed row.
    pub fn has_class(&self, name: &str) -> bool {
        self.classes
            .as_ref()
            .map(|set| set.contains(name))
            .unwrap_or(false)
    }
}

/// The ordered row sequence produced by one render of a list display.
///
/// Document order equals display order; the sequence length equals the number
/// of result items the renderer produced, an external fact the checker accepts
/// as given.
#[derive(Debug, Clone, Default)]
pub struct RenderedOutput {
    rows: Vec<RenderedRow>,
    url: Option<String>,
}

impl RenderedOutput {
    /// Wrap an already-extracted row sequence.
    pub fn new(rows: Vec<RenderedRow>) -> Self {
        Self { rows, url: None }
    }

    /// Record the URL this output was fetched from.
    pub fn fetched_from(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    /// Source URL, when the output came from an HTTP fetch.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
