//! Errors raised at the CGI boundary.
//!
//! The handlers themselves cannot fail. Everything here comes from reading
//! the CGI environment, the request stream, or a script's output document.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CgiError {
    /// Reading stdin, writing stdout, or listing a directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `CONTENT_LENGTH` was set but is not a non-negative integer.
    #[error("invalid CONTENT_LENGTH: {0:?}")]
    InvalidContentLength(String),

    /// A script's output is not a well-formed CGI response document.
    #[error("invalid CGI output: {0}")]
    InvalidOutput(String),
}
