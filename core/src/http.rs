//! Request and response values exchanged between a host and the handlers.
//!
//! # Design
//! A host adapter (the CGI executables or the development server) builds a
//! `CgiRequest`, hands it to a handler, and transmits the returned
//! `CgiResponse`. Neither type refers to process-wide state, so a handler
//! invocation sees exactly the request it was given.
//!
//! Bodies are raw bytes: the body echo passes request bytes through without
//! assuming any encoding.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// The two media types the handlers respond with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    TextHtml,
    TextPlain,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TextHtml => "text/html",
            ContentType::TextPlain => "text/plain",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing cookie directive. The expiry is relative to the moment the
/// client receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub max_age: Duration,
    pub path: String,
}

impl SetCookie {
    /// Render the `Set-Cookie` header value, e.g.
    /// `test_cookie=cookie_value; Max-Age=3600; Path=/`.
    pub fn header_value(&self) -> String {
        format!(
            "{}={}; Max-Age={}; Path={}",
            self.name,
            self.value,
            self.max_age.as_secs(),
            self.path
        )
    }
}

/// An incoming request as seen by a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CgiRequest {
    /// Cookie name to decoded value, as sent by the client.
    pub cookies: BTreeMap<String, String>,
    /// Raw request body, possibly empty.
    pub body: Vec<u8>,
}

impl CgiRequest {
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

/// A response produced by a handler, ready for the host to transmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CgiResponse {
    pub status: u16,
    pub content_type: ContentType,
    pub body: Vec<u8>,
    pub set_cookie: Option<SetCookie>,
}

impl CgiResponse {
    /// A 200 response without a cookie directive.
    pub fn ok(content_type: ContentType, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.into(),
            set_cookie: None,
        }
    }

    /// The document a CGI executable emits when it fails before producing
    /// a handler response.
    pub fn internal_error() -> Self {
        Self {
            status: 500,
            content_type: ContentType::TextPlain,
            body: b"Internal Server Error".to_vec(),
            set_cookie: None,
        }
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cookie() -> SetCookie {
        SetCookie {
            name: "test_cookie".to_string(),
            value: "cookie_value".to_string(),
            max_age: Duration::from_secs(3600),
            path: "/".to_string(),
        }
    }

    #[test]
    fn set_cookie_header_value() {
        assert_eq!(
            test_cookie().header_value(),
            "test_cookie=cookie_value; Max-Age=3600; Path=/"
        );
    }

    #[test]
    fn ok_response_has_status_200_and_no_cookie() {
        let response = CgiResponse::ok(ContentType::TextPlain, "hi");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"hi");
        assert!(response.set_cookie.is_none());
    }

    #[test]
    fn cookie_lookup_by_name() {
        let mut request = CgiRequest::default();
        request
            .cookies
            .insert("test_cookie".to_string(), "abc".to_string());
        assert_eq!(request.cookie("test_cookie"), Some("abc"));
        assert_eq!(request.cookie("other"), None);
    }

    #[test]
    fn content_type_strings() {
        assert_eq!(ContentType::TextHtml.to_string(), "text/html");
        assert_eq!(ContentType::TextPlain.as_str(), "text/plain");
    }
}
