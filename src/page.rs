//! Form and page probes.
//!
//! After a form round-trip the interesting questions are small and concrete:
//! which options does a select offer, which one is selected, what value did a
//! field keep. These probes answer them over raw HTML so callers can assert
//! on a page fetched through any [`HttpTestClient`](crate::HttpTestClient).

use scraper::{Html, Selector};

use crate::{Error, Result};

fn parse_selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|_| Error::SelectorError(raw.to_string()))
}

// Ids and names are interpolated into attribute selectors; a stray quote
// would change the selector's meaning.
fn check_quotable(value: &str) -> Result<()> {
    if value.contains('"') || value.contains('\\') {
        return Err(Error::SelectorError(value.to_string()));
    }
    Ok(())
}

/// The `value`s offered by `<select id="...">`, sorted.
///
/// Options without an explicit `value` attribute fall back to their text, the
/// way a browser submits them.
pub fn select_options(html: &str, select_id: &str) -> Result<Vec<String>> {
    check_quotable(select_id)?;
    let selector = parse_selector(&format!(r#"select[id="{}"] option"#, select_id))?;

    let document = Html::parse_document(html);
    let mut options: Vec<String> = document
        .select(&selector)
        .map(|opt| match opt.value().attr("value") {
            Some(v) => v.to_string(),
            None => opt.text().collect::<String>().trim().to_string(),
        })
        .collect();
    options.sort_unstable();
    Ok(options)
}

/// The `value` of the option carrying the `selected` attribute, if any.
pub fn selected_option(html: &str, select_id: &str) -> Result<Option<String>> {
    check_quotable(select_id)?;
    let selector = parse_selector(&format!(
        r#"select[id="{}"] option[selected]"#,
        select_id
    ))?;

    let document = Html::parse_document(html);
    Ok(document.select(&selector).next().map(|opt| {
        match opt.value().attr("value") {
            Some(v) => v.to_string(),
            None => opt.text().collect::<String>().trim().to_string(),
        }
    }))
}

/// The current value of the named form control.
///
/// Covers `<input>` (the `value` attribute) and `<textarea>` (its text).
pub fn field_value(html: &str, field_name: &str) -> Result<Option<String>> {
    check_quotable(field_name)?;
    let input_sel = parse_selector(&format!(r#"input[name="{}"]"#, field_name))?;
    let textarea_sel = parse_selector(&format!(r#"textarea[name="{}"]"#, field_name))?;

    let document = Html::parse_document(html);
    if let Some(input) = document.select(&input_sel).next() {
        return Ok(input.value().attr("value").map(|v| v.to_string()));
    }
    if let Some(area) = document.select(&textarea_sel).next() {
        return Ok(Some(area.text().collect::<String>()));
    }
    Ok(None)
}
