//! The scripts' request handlers.
//!
//! # Design
//! Each handler is a pure function from a `CgiRequest` to a `CgiResponse`.
//! The only side effect a handler asks for is the cookie directive returned
//! by `cookie_echo` on a first visit; transmitting it is the host's job.

use std::time::Duration;

use tracing::debug;

use crate::escape::escape_html;
use crate::http::{CgiRequest, CgiResponse, ContentType, SetCookie};

pub const TEST_COOKIE_NAME: &str = "test_cookie";
pub const TEST_COOKIE_VALUE: &str = "cookie_value";
pub const TEST_COOKIE_MAX_AGE: Duration = Duration::from_secs(3600);

const COOKIE_SET_PAGE: &str = "<p>Cookie wurde gesetzt. Bitte lade die Seite neu.</p>";
const BODY_RECEIVED_PREFIX: &str = "Body wurde empfangen.\n\nInhalt:\n";
const NO_BODY_TEXT: &str = "Kein Body empfangen.";

/// Set `test_cookie` when the client has none, otherwise echo its value
/// HTML-escaped.
pub fn cookie_echo(request: &CgiRequest) -> CgiResponse {
    match request.cookie(TEST_COOKIE_NAME) {
        None => {
            debug!(cookie = TEST_COOKIE_NAME, "not sent, setting it");
            let mut response = CgiResponse::ok(ContentType::TextHtml, COOKIE_SET_PAGE);
            response.set_cookie = Some(SetCookie {
                name: TEST_COOKIE_NAME.to_string(),
                value: TEST_COOKIE_VALUE.to_string(),
                max_age: TEST_COOKIE_MAX_AGE,
                path: "/".to_string(),
            });
            response
        }
        Some(value) => {
            debug!(cookie = TEST_COOKIE_NAME, len = value.len(), "echoing cookie");
            let page = format!("<p>Cookie empfangen: {}</p>", escape_html(value));
            CgiResponse::ok(ContentType::TextHtml, page)
        }
    }
}

/// Echo the request body verbatim after a short preamble, or report that
/// none was sent.
pub fn body_echo(request: &CgiRequest) -> CgiResponse {
    if request.body.is_empty() {
        debug!("empty request body");
        return CgiResponse::ok(ContentType::TextPlain, NO_BODY_TEXT);
    }

    debug!(len = request.body.len(), "echoing request body");
    let mut body = Vec::with_capacity(BODY_RECEIVED_PREFIX.len() + request.body.len());
    body.extend_from_slice(BODY_RECEIVED_PREFIX.as_bytes());
    body.extend_from_slice(&request.body);
    CgiResponse::ok(ContentType::TextPlain, body)
}

/// Render an HTML page listing `files`, sorted by name.
pub fn file_listing(files: &[String]) -> CgiResponse {
    let mut page = String::from("<html><body>\n");
    if files.is_empty() {
        page.push_str("<p>Keine Dateien im aktuellen Verzeichnis gefunden.</p>\n");
    } else {
        let mut sorted: Vec<&str> = files.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        page.push_str(&format!(
            "<p>Es wurden {} Datei(en) gefunden.</p>\n<ul>\n",
            sorted.len()
        ));
        for name in sorted {
            page.push_str(&format!("<li>{}</li>\n", escape_html(name)));
        }
        page.push_str("</ul>\n");
    }
    page.push_str("</body></html>\n");

    debug!(count = files.len(), "rendered file listing");
    CgiResponse::ok(ContentType::TextHtml, page)
}
