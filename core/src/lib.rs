//! Request handlers for the cookie and body echo CGI scripts.
//!
//! # Overview
//! Handlers take a `CgiRequest` and return a `CgiResponse` without touching
//! the process environment or stdio (host-does-IO pattern). Host adapters
//! (the `echo-cgi` executables and the `echo-server` development server)
//! build the request and transmit the response.
//!
//! # Design
//! - `handlers` holds the script logic: cookie echo, body echo, file listing.
//! - `cookie` parses `Cookie` headers; `escape` makes text safe for HTML.
//! - `cgi` is the CGI/1.1 wire codec shared by the adapters.
//! - Only the `cgi` module can fail; its errors are `CgiError`.

pub mod cgi;
pub mod cookie;
pub mod error;
pub mod escape;
pub mod handlers;
pub mod http;
pub mod script;

pub use cgi::{parse_output, write_response, CgiEnv, CgiOutput};
pub use cookie::{parse_cookie_header, parse_cookie_headers};
pub use error::CgiError;
pub use escape::escape_html;
pub use handlers::{body_echo, cookie_echo, file_listing};
pub use http::{CgiRequest, CgiResponse, ContentType, SetCookie};
pub use script::Script;
