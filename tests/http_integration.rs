//! End-to-end tests against a local fixture server.

use std::io::Read;

use rowcheck::{page, Checker, ClientConfig, HttpClient, HttpTestClient};
use tiny_http::{Response, Server};

const LIST_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Latest posts</title></head>
<body>
<div class="view-content">
  <div class="views-row views-row-1 views-row-odd views-row-first">first post</div>
  <div class="views-row views-row-2 views-row-even">second post</div>
  <div class="views-row views-row-3 views-row-odd views-row-last">third post</div>
</div>
</body>
</html>"#;

const BROKEN_LIST_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Latest posts</title></head>
<body>
<div class="view-content">
  <div class="views-row views-row-1 views-row-odd views-row-first">first post</div>
  <div class="views-row views-row-2">second post</div>
  <div class="views-row views-row-3 views-row-odd views-row-last">third post</div>
</div>
</body>
</html>"#;

fn html_response(body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body).with_header(
        "Content-Type: text/html; charset=utf-8"
            .parse::<tiny_http::Header>()
            .unwrap(),
    )
}

/// Render the formatter config form with the given option selected.
fn config_form(selected: &str, trim_length: &str) -> String {
    let mut options = String::new();
    for value in ["text_default", "text_plain", "text_trimmed"] {
        if value == selected {
            options.push_str(&format!(
                r#"<option value="{}" selected="selected">{}</option>"#,
                value, value
            ));
        } else {
            options.push_str(&format!(r#"<option value="{}">{}</option>"#, value, value));
        }
    }
    format!(
        r#"<html><body><form action="/config" method="post">
<select id="edit-options-type" name="options[type]">{}</select>
<input type="text" name="options[settings][trim_length]" value="{}" />
</form></body></html>"#,
        options, trim_length
    )
}

/// Start a fixture server; returns its base URL. The server keeps the last
/// posted form state and serves it back, the way the real renderer persists
/// configuration between requests.
fn start_fixture_server() -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();

    std::thread::spawn(move || {
        let mut selected = "text_default".to_string();
        let mut trim_length = "600".to_string();

        for mut request in server.incoming_requests() {
            let path = request.url().to_string();
            let is_post = request.method() == &tiny_http::Method::Post;

            if is_post && path == "/config" {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
                    match key.as_ref() {
                        "options[type]" => selected = value.into_owned(),
                        "options[settings][trim_length]" => trim_length = value.into_owned(),
                        _ => {}
                    }
                }
            }

            let response = match path.as_str() {
                "/latest" => html_response(LIST_PAGE),
                "/broken" => html_response(BROKEN_LIST_PAGE),
                "/config" => html_response(&config_form(&selected, &trim_length)),
                _ => Response::from_string("Not Found").with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });

    format!("http://{}", addr)
}

#[test]
fn check_url_passes_on_a_correctly_labeled_page() {
    let base = start_fixture_server();
    let checker = Checker::new(ClientConfig::default()).expect("failed to build checker");

    let result = checker
        .check_url(&format!("{}/latest", base), ".view-content > div")
        .expect("check failed");
    assert!(result.passed());
    assert_eq!(result.len(), 3);
}

#[test]
fn fetched_rows_carry_their_source_url() {
    let base = start_fixture_server();
    let checker = Checker::new(ClientConfig::default()).expect("failed to build checker");
    let url = format!("{}/latest", base);

    let output = checker
        .fetch_rows(&url, ".view-content > div")
        .expect("fetch failed");
    assert_eq!(output.url(), Some(url.as_str()));
    assert_eq!(output.len(), 3);
}

#[test]
fn check_url_reports_the_broken_row() {
    let base = start_fixture_server();
    let checker = Checker::new(ClientConfig::default()).expect("failed to build checker");

    let result = checker
        .check_url(&format!("{}/broken", base), ".view-content > div")
        .expect("check failed");
    assert!(!result.passed());

    let failures: Vec<_> = result.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 2);
    assert_eq!(failures[0].1.expected, "views-row-even");
}

#[test]
fn missing_page_is_a_fetch_error() {
    let base = start_fixture_server();
    let checker = Checker::new(ClientConfig::default()).expect("failed to build checker");

    let err = checker
        .check_url(&format!("{}/nope", base), ".views-row")
        .unwrap_err();
    assert!(matches!(err, rowcheck::Error::FetchError(_)));
}

#[test]
fn page_title_comes_through_the_fetch() {
    let base = start_fixture_server();
    let client = HttpClient::new(ClientConfig::default()).expect("failed to build client");

    let resp = client.get(&format!("{}/latest", base)).expect("GET failed");
    assert!(resp.is_success());
    assert_eq!(
        rowcheck::page_title(&resp.body).as_deref(),
        Some("Latest posts")
    );
}

#[test]
fn form_round_trip_persists_the_formatter_settings() -> anyhow::Result<()> {
    let base = start_fixture_server();
    let client = HttpClient::new(ClientConfig::default())?;
    let url = format!("{}/config", base);

    // Initial state: the default formatter is selected.
    let resp = client.get(&url)?;
    let options = page::select_options(&resp.body, "edit-options-type")?;
    assert_eq!(options, vec!["text_default", "text_plain", "text_trimmed"]);
    assert_eq!(
        page::selected_option(&resp.body, "edit-options-type")?,
        Some("text_default".to_string())
    );

    // Apply a new formatter and trim length.
    let resp = client.post_form(
        &url,
        &[
            ("options[type]", "text_trimmed"),
            ("options[settings][trim_length]", "250"),
        ],
    )?;
    assert!(resp.is_success());

    // Re-fetch: the settings survived the round trip.
    let resp = client.get(&url)?;
    assert_eq!(
        page::selected_option(&resp.body, "edit-options-type")?,
        Some("text_trimmed".to_string())
    );
    assert_eq!(
        page::field_value(&resp.body, "options[settings][trim_length]")?,
        Some("250".to_string())
    );
    Ok(())
}
