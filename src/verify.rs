//! The row-class verifier.
//!
//! Checks that every row in a rendered list carries the positional CSS
//! classes the renderer is contracted to emit: a 1-based position class, an
//! alternating odd/even parity class, first/last markers on the boundary
//! rows, and the standalone base class. Verification is a pure function over
//! an immutable row sequence; calling it twice on the same input yields
//! identical results.

use serde::Serialize;

use crate::row::{RenderedOutput, RenderedRow};
use crate::{Error, Result};

/// Default class prefix used by the checked renderer (`views-row`,
/// `views-row-1`, `views-row-odd`, ...).
pub const DEFAULT_CLASS_PREFIX: &str = "views-row";

/// One of the five per-row invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Row `i` carries `{prefix}-{i}`
    Position,
    /// Row `i` carries `{prefix}-odd` or `{prefix}-even` (row 1 is odd)
    Parity,
    /// Row 1 carries `{prefix}-first`
    First,
    /// Row N carries `{prefix}-last`
    Last,
    /// Every row carries the bare `{prefix}` token
    BaseClass,
}

impl Check {
    /// Short name used in diagnostics ("position", "parity", ...).
    pub fn name(&self) -> &'static str {
        match self {
            Check::Position => "position",
            Check::Parity => "parity",
            Check::First => "first",
            Check::Last => "last",
            Check::BaseClass => "base-class",
        }
    }
}

/// Outcome of a single check on a single row.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub check: Check,
    /// The exact class token the check looked for
    pub expected: String,
    pub passed: bool,
}

/// All outcomes for one row, keyed by its 1-based position.
///
/// A malformed row (no parsable class attribute) carries the reason instead
/// of outcomes; it fails verification but does not stop the rows after it
/// from being checked.
#[derive(Debug, Clone, Serialize)]
pub struct RowReport {
    /// 1-based row position
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malformed: Option<String>,
    pub outcomes: Vec<CheckOutcome>,
}

impl RowReport {
    /// Whether every applicable check on this row held.
    pub fn passed(&self) -> bool {
        self.malformed.is_none() && self.outcomes.iter().all(|o| o.passed)
    }

    /// The outcomes that did not hold.
    pub fn failed_outcomes(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

/// Structured result of a verification run, one report per row.
///
/// Zero rows is a valid input and verifies vacuously; use
/// [`RowClassVerifier::verify_non_empty`] when an empty sequence should be
/// treated as a failure instead.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    rows: Vec<RowReport>,
}

impl VerificationResult {
    /// Whether all applicable checks held for all rows.
    pub fn passed(&self) -> bool {
        self.rows.iter().all(|r| r.passed())
    }

    /// Per-row reports in row order.
    pub fn rows(&self) -> &[RowReport] {
        &self.rows
    }

    /// Every failing check, as `(row index, outcome)` pairs in row order.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &CheckOutcome)> {
        self.rows
            .iter()
            .flat_map(|r| r.failed_outcomes().map(move |o| (r.index, o)))
    }

    /// Rows that had no parsable class attribute, as `(index, reason)`.
    pub fn malformed_rows(&self) -> impl Iterator<Item = (usize, &str)> {
        self.rows
            .iter()
            .filter_map(|r| r.malformed.as_deref().map(|m| (r.index, m)))
    }

    /// Hard-fail on the first malformed row.
    ///
    /// For callers that treat a missing class attribute as fatal rather than
    /// as a reportable per-row outcome.
    pub fn ensure_well_formed(&self) -> Result<()> {
        match self.malformed_rows().next() {
            Some((index, reason)) => Err(Error::MalformedRow {
                index,
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Number of rows that were checked.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Verifier for positionally-derived row classes.
///
/// The default verifier checks the `views-row` family; `with_prefix` retargets
/// the same protocol at another renderer's class scheme.
#[derive(Debug, Clone)]
pub struct RowClassVerifier {
    prefix: String,
}

impl Default for RowClassVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RowClassVerifier {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }

    /// Use a different class prefix (e.g. `team-item` for `team-item-1`,
    /// `team-item-odd`, ...).
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Run all applicable checks over the row sequence.
    ///
    /// Pure and idempotent; an empty sequence passes vacuously.
    pub fn verify(&self, output: &RenderedOutput) -> VerificationResult {
        let total = output.len();
        let rows = output
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| self.check_row(row, i + 1, total))
            .collect();
        VerificationResult { rows }
    }

    /// Like [`verify`](Self::verify), but an empty sequence is an error.
    pub fn verify_non_empty(&self, output: &RenderedOutput) -> Result<VerificationResult> {
        if output.is_empty() {
            return Err(Error::EmptySequence);
        }
        Ok(self.verify(output))
    }

    fn check_row(&self, row: &RenderedRow, index: usize, total: usize) -> RowReport {
        if let Some(reason) = row.malformed_reason() {
            log::warn!("row {} is malformed: {}", index, reason);
            return RowReport {
                index,
                malformed: Some(reason.to_string()),
                outcomes: Vec::new(),
            };
        }

        let mut outcomes = Vec::with_capacity(5);
        let mut push = |check: Check, expected: String, row: &RenderedRow| {
            let passed = row.has_class(&expected);
            if !passed {
                log::debug!("row {}: missing `{}` ({})", index, expected, check.name());
            }
            outcomes.push(CheckOutcome {
                check,
                expected,
                passed,
            });
        };

        push(Check::Position, format!("{}-{}", self.prefix, index), row);

        // Row 1 is odd, matching the renderer's 1-based alternation.
        let parity = if index % 2 == 0 { "even" } else { "odd" };
        push(Check::Parity, format!("{}-{}", self.prefix, parity), row);

        if index == 1 {
            push(Check::First, format!("{}-first", self.prefix), row);
        }
        if index == total {
            push(Check::Last, format!("{}-last", self.prefix), row);
        }

        push(Check::BaseClass, self.prefix.clone(), row);

        RowReport {
            index,
            malformed: None,
            outcomes,
        }
    }
}

/// Verify with the default `views-row` class scheme.
pub fn verify(output: &RenderedOutput) -> VerificationResult {
    RowClassVerifier::new().verify(output)
}
