use std::fmt;

use crate::http::ContentType;

/// The scripts a host can run, named the way they are mounted under
/// `/cgi-bin/` and installed as executables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Sets `test_cookie` on first visit and echoes it afterwards.
    Cookies,
    /// Echoes the raw request body.
    BodyEcho,
    /// Lists the files next to the script.
    RelativeFiles,
}

impl Script {
    pub const ALL: [Script; 3] = [Script::Cookies, Script::BodyEcho, Script::RelativeFiles];

    pub fn name(&self) -> &'static str {
        match self {
            Script::Cookies => "cookies",
            Script::BodyEcho => "body-echo",
            Script::RelativeFiles => "relative-files",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|script| script.name() == name)
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            Script::Cookies | Script::RelativeFiles => ContentType::TextHtml,
            Script::BodyEcho => ContentType::TextPlain,
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
