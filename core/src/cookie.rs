//! `Cookie` request header parsing.
//!
//! Values are URL-decoded (`+` as space, `%XX` escapes) the way CGI hosts
//! such as PHP present them to scripts. A name without `=` is registered
//! with an empty value. When a name occurs more than once the first
//! occurrence wins.

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;

/// Parse a single `Cookie` header value into a name → value mapping.
pub fn parse_cookie_header(header: &str) -> BTreeMap<String, String> {
    let mut cookies = BTreeMap::new();
    merge_cookie_header(&mut cookies, header);
    cookies
}

/// Parse several `Cookie` header lines (HTTP/2 clients may split them) into
/// one mapping.
pub fn parse_cookie_headers<'a, I>(headers: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cookies = BTreeMap::new();
    for header in headers {
        merge_cookie_header(&mut cookies, header);
    }
    cookies
}

fn merge_cookie_header(cookies: &mut BTreeMap<String, String>, header: &str) {
    for pair in header.split(';') {
        let pair = pair.trim();
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        cookies
            .entry(name.to_string())
            .or_insert_with(|| decode_value(value.trim()));
    }
}

fn decode_value(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw).decode_utf8_lossy().into_owned()
}
