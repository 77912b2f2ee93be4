//! rowcheck
//!
//! A headless verifier for positionally-derived CSS row classes on rendered
//! list markup. List renderers commonly stamp each row with its 1-based
//! position (`views-row-1`), an alternating parity label (`views-row-odd` /
//! `views-row-even`), first/last markers on the boundary rows, and a base
//! class (`views-row`). This crate fetches (or accepts) the rendered HTML,
//! extracts the rows with a CSS selector, and checks all five invariants per
//! row with exact token matching.
//!
//! # Example
//!
//! ```
//! use rowcheck::{extract_rows, verify};
//!
//! # fn main() -> rowcheck::Result<()> {
//! let html = r#"<div class="view-content">
//!   <div class="views-row views-row-1 views-row-odd views-row-first">a</div>
//!   <div class="views-row views-row-2 views-row-even views-row-last">b</div>
//! </div>"#;
//!
//! let rows = extract_rows(html, ".view-content > div")?;
//! let result = verify(&rows);
//! assert!(result.passed());
//! # Ok(())
//! # }
//! ```
//!
//! For end-to-end checks against a running server, [`Checker`] combines an
//! HTTP client with extraction and verification; [`page`] offers probes for
//! asserting on form state after a [`HttpTestClient::post_form`] round-trip.

pub mod error;
pub use error::{Error, Result};

pub mod row;
pub use row::{RenderedOutput, RenderedRow};

pub mod verify;
pub use verify::{
    verify, Check, CheckOutcome, RowClassVerifier, RowReport, VerificationResult,
    DEFAULT_CLASS_PREFIX,
};

pub mod extract;
pub use extract::{extract_rows, page_title};

pub mod client;
pub use client::{ClientConfig, HttpClient, HttpTestClient, Response};

pub mod page;

pub mod checker;
pub use checker::Checker;
