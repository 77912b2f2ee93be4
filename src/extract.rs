//! HTML extraction: turn a rendered document into an ordered row sequence.
//!
//! The renderer itself is a black box; all this module needs from it is that
//! document order equals display order, which `scraper` preserves when
//! iterating selector matches.

use scraper::{Html, Selector};

use crate::row::{RenderedOutput, RenderedRow};
use crate::{Error, Result};

/// Extract the rows matched by `row_selector` from a rendered document.
///
/// Rows are collected in document order. A matched element without a `class`
/// attribute becomes a malformed row; extraction continues past it so the
/// verifier can still report on the remaining rows.
pub fn extract_rows(html: &str, row_selector: &str) -> Result<RenderedOutput> {
    let selector = Selector::parse(row_selector)
        .map_err(|_| Error::SelectorError(row_selector.to_string()))?;

    let document = Html::parse_document(html);
    let rows = document
        .select(&selector)
        .map(|element| match element.value().attr("class") {
            Some(attr) => RenderedRow::from_class_attr(attr),
            None => RenderedRow::malformed("class attribute missing"),
        })
        .collect::<Vec<_>>();

    log::debug!("extracted {} rows for `{}`", rows.len(), row_selector);
    Ok(RenderedOutput::new(rows))
}

/// Extract the document title, if any.
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|n| n.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"<!DOCTYPE html>
<html>
<head><title>Latest posts</title></head>
<body>
<div class="view-content">
  <div class="views-row views-row-1 views-row-odd views-row-first">one</div>
  <div class="views-row views-row-2 views-row-even">two</div>
  <div class="views-row views-row-3 views-row-odd views-row-last">three</div>
</div>
</body>
</html>"#;

    #[test]
    fn rows_come_out_in_document_order() {
        let output = extract_rows(LIST, ".view-content > div").unwrap();
        assert_eq!(output.len(), 3);
        assert!(output.rows()[0].has_class("views-row-1"));
        assert!(output.rows()[1].has_class("views-row-2"));
        assert!(output.rows()[2].has_class("views-row-3"));
    }

    #[test]
    fn classless_element_becomes_malformed_row() {
        let html = r#"<ul><li class="views-row views-row-1 views-row-odd views-row-first views-row-last">a</li><li>b</li></ul>"#;
        let output = extract_rows(html, "li").unwrap();
        assert_eq!(output.len(), 2);
        assert!(output.rows()[0].classes().is_some());
        assert!(output.rows()[1].malformed_reason().is_some());
    }

    #[test]
    fn invalid_selector_is_rejected() {
        let err = extract_rows(LIST, ":::nope").unwrap_err();
        assert!(matches!(err, Error::SelectorError(_)));
    }

    #[test]
    fn no_matches_yields_empty_output() {
        let output = extract_rows(LIST, ".missing").unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn title_is_extracted() {
        assert_eq!(page_title(LIST).as_deref(), Some("Latest posts"));
        assert_eq!(page_title("<html><body>no title</body></html>"), None);
    }
}
