//! CGI/1.1 wire codec.
//!
//! # Design
//! The script side reads meta-variables and the request body into a
//! `CgiRequest` and writes a `CgiResponse` as a CGI response document
//! (header lines, blank line, body). `parse_output` is the host side of the
//! same document and follows the rules a web server applies when reading a
//! script's stdout.
//!
//! Everything here works on `Read`/`Write` values and an explicit `CgiEnv`
//! so tests never touch the real process environment or stdio.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::cookie::parse_cookie_header;
use crate::error::CgiError;
use crate::http::{CgiRequest, CgiResponse};

pub const HTTP_COOKIE: &str = "HTTP_COOKIE";
pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";
pub const SCRIPT_FILENAME: &str = "SCRIPT_FILENAME";

/// CGI meta-variables passed to a script.
#[derive(Debug, Clone, Default)]
pub struct CgiEnv {
    vars: HashMap<String, String>,
}

impl CgiEnv {
    /// Snapshot the current process environment. Non-UTF-8 values are
    /// converted lossily.
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars_os().map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        }))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// `CONTENT_LENGTH`, or `None` when unset or empty.
    pub fn content_length(&self) -> Result<Option<u64>, CgiError> {
        match self.get(CONTENT_LENGTH).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<u64>()
                .map(Some)
                .map_err(|_| CgiError::InvalidContentLength(raw.to_string())),
        }
    }
}

impl CgiRequest {
    /// Build a request from CGI meta-variables and the script's stdin.
    ///
    /// The body is limited to `CONTENT_LENGTH` bytes when it is set and read
    /// to end-of-file otherwise. A stream shorter than the declared length is
    /// accepted as-is.
    pub fn from_cgi<R: Read>(env: &CgiEnv, mut stdin: R) -> Result<Self, CgiError> {
        let cookies = env.get(HTTP_COOKIE).map(parse_cookie_header).unwrap_or_default();

        let mut body = Vec::new();
        match env.content_length()? {
            Some(len) => {
                stdin.take(len).read_to_end(&mut body)?;
                if (body.len() as u64) < len {
                    warn!(
                        declared = len,
                        read = body.len(),
                        "request body shorter than CONTENT_LENGTH"
                    );
                }
            }
            None => {
                stdin.read_to_end(&mut body)?;
            }
        }

        debug!(cookies = cookies.len(), body_len = body.len(), "read CGI request");
        Ok(Self { cookies, body })
    }
}

/// Write `response` as a CGI response document.
///
/// A `Status` header is only emitted for non-200 responses, since hosts
/// default to 200.
pub fn write_response<W: Write>(response: &CgiResponse, out: &mut W) -> std::io::Result<()> {
    write!(out, "Content-Type: {}\r\n", response.content_type)?;
    if let Some(cookie) = &response.set_cookie {
        write!(out, "Set-Cookie: {}\r\n", cookie.header_value())?;
    }
    if response.status != 200 {
        write!(out, "Status: {} {}\r\n", response.status, reason_phrase(response.status))?;
    }
    out.write_all(b"\r\n")?;
    out.write_all(&response.body)?;
    out.flush()
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}

/// A script's response document as read by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CgiOutput {
    pub status: u16,
    /// Header lines in the order the script wrote them, without `Status`.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CgiOutput {
    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Parse a script's stdout into status, headers and body.
///
/// Header lines end in `\n` or `\r\n` and the block ends at the first empty
/// line. Each header needs a non-empty key that does not start with
/// whitespace and a non-empty value. `Status: <code> [reason]` overrides the
/// default 200.
pub fn parse_output(output: &[u8]) -> Result<CgiOutput, CgiError> {
    let mut rest = output;
    let mut status = 200;
    let mut headers = Vec::new();

    loop {
        let newline = rest
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| CgiError::InvalidOutput("missing end of header block".to_string()))?;
        let mut line = &rest[..newline];
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
        rest = &rest[newline + 1..];

        if line.is_empty() {
            break;
        }

        let line = std::str::from_utf8(line)
            .map_err(|_| CgiError::InvalidOutput("header line is not UTF-8".to_string()))?;
        let (key, value) = line.split_once(':').ok_or_else(|| {
            CgiError::InvalidOutput(format!("header line without colon: {line:?}"))
        })?;
        if key.is_empty() || key.starts_with(char::is_whitespace) {
            return Err(CgiError::InvalidOutput(format!("invalid header name: {line:?}")));
        }
        let value = value.trim();
        if value.is_empty() {
            return Err(CgiError::InvalidOutput(format!("empty header value: {key}")));
        }

        if key.eq_ignore_ascii_case("status") {
            status = parse_status(value)?;
        } else {
            headers.push((key.to_string(), value.to_string()));
        }
    }

    Ok(CgiOutput {
        status,
        headers,
        body: rest.to_vec(),
    })
}

fn parse_status(value: &str) -> Result<u16, CgiError> {
    let code = value.split_whitespace().next().unwrap_or_default();
    match code.parse::<u16>() {
        Ok(status) if (100..=999).contains(&status) => Ok(status),
        _ => Err(CgiError::InvalidOutput(format!("invalid Status header: {value:?}"))),
    }
}

/// Names of the regular files in `dir`, sorted, excluding `exclude`.
/// Symlinks to files count as files.
pub fn list_files(dir: &Path, exclude: Option<&OsStr>) -> Result<Vec<String>, CgiError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if Some(name.as_os_str()) == exclude || !entry.path().is_file() {
            continue;
        }
        files.push(name.to_string_lossy().into_owned());
    }
    files.sort();
    Ok(files)
}

/// Files that sit next to `script_path`, excluding the script itself.
pub fn list_sibling_files(script_path: &Path) -> Result<Vec<String>, CgiError> {
    let dir = match script_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    list_files(dir, script_path.file_name())
}
