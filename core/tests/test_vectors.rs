//! Run the handlers against the JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes the CGI input a host would provide and the exact
//! response document fields the script must produce. Requests go through
//! `CgiRequest::from_cgi` so the vectors cover the wire boundary as well.

use echo_core::cgi::{CONTENT_LENGTH, HTTP_COOKIE};
use echo_core::{body_echo, cookie_echo, write_response, CgiEnv, CgiRequest, ContentType};
use serde::Deserialize;

#[derive(Deserialize)]
struct Vectors<T> {
    cases: Vec<T>,
}

#[derive(Deserialize)]
struct CookieCase {
    name: String,
    cookie_header: Option<String>,
    expected_body: String,
    expected_set_cookie: Option<String>,
}

#[derive(Deserialize)]
struct BodyCase {
    name: String,
    content_length: Option<String>,
    stdin: String,
    expected_body: String,
}

// ---------------------------------------------------------------------------
// Cookie echo
// ---------------------------------------------------------------------------

#[test]
fn cookie_echo_test_vectors() {
    let raw = include_str!("../../test-vectors/cookie_echo.json");
    let vectors: Vectors<CookieCase> = serde_json::from_str(raw).unwrap();

    for case in vectors.cases {
        let name = &case.name;
        let env = CgiEnv::from_pairs(case.cookie_header.map(|h| (HTTP_COOKIE, h)));
        let request = CgiRequest::from_cgi(&env, std::io::empty()).unwrap();

        let response = cookie_echo(&request);
        assert_eq!(response.status, 200, "{name}: status");
        assert_eq!(response.content_type, ContentType::TextHtml, "{name}: content type");
        assert_eq!(response.body_text(), case.expected_body.as_str(), "{name}: body");
        assert_eq!(
            response.set_cookie.map(|c| c.header_value()),
            case.expected_set_cookie,
            "{name}: set-cookie"
        );
    }
}

#[test]
fn cookie_echo_vectors_are_stable_across_repeats() {
    let raw = include_str!("../../test-vectors/cookie_echo.json");
    let vectors: Vectors<CookieCase> = serde_json::from_str(raw).unwrap();

    for case in vectors.cases {
        let env = CgiEnv::from_pairs(case.cookie_header.map(|h| (HTTP_COOKIE, h)));
        let request = CgiRequest::from_cgi(&env, std::io::empty()).unwrap();
        assert_eq!(cookie_echo(&request), cookie_echo(&request), "{}", case.name);
    }
}

// ---------------------------------------------------------------------------
// Body echo
// ---------------------------------------------------------------------------

#[test]
fn body_echo_test_vectors() {
    let raw = include_str!("../../test-vectors/body_echo.json");
    let vectors: Vectors<BodyCase> = serde_json::from_str(raw).unwrap();

    for case in vectors.cases {
        let name = &case.name;
        let env = CgiEnv::from_pairs(case.content_length.map(|len| (CONTENT_LENGTH, len)));
        let request = CgiRequest::from_cgi(&env, case.stdin.as_bytes()).unwrap();

        let response = body_echo(&request);
        assert_eq!(response.status, 200, "{name}: status");
        assert_eq!(response.content_type, ContentType::TextPlain, "{name}: content type");
        assert_eq!(response.body, case.expected_body.as_bytes(), "{name}: body");
        assert!(response.set_cookie.is_none(), "{name}: no cookie");

        let mut document = Vec::new();
        write_response(&response, &mut document).unwrap();
        let expected = format!("Content-Type: text/plain\r\n\r\n{}", case.expected_body);
        assert_eq!(document, expected.as_bytes(), "{name}: document");
    }
}
