use serde::Serialize;
use std::fmt;

/// Line terminator written in place of every recognized line ending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n` (^J)
    #[default]
    Unix,
    /// `\r` (^M)
    Mac,
    /// `\r\n` (^M^J)
    Dos,
}

impl LineEnding {
    /// Byte sequence emitted for one terminator
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Unix => b"\n",
            LineEnding::Mac => b"\r",
            LineEnding::Dos => b"\r\n",
        }
    }

    /// Resolve the terminator from the `-m` / `-d` command line switches.
    /// Unix when neither is set; callers resolve last-wins before calling.
    pub fn from_flags(mac: bool, dos: bool) -> Self {
        match (mac, dos) {
            (_, true) => LineEnding::Dos,
            (true, false) => LineEnding::Mac,
            (false, false) => LineEnding::Unix,
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineEnding::Unix => "Unix",
            LineEnding::Mac => "Mac",
            LineEnding::Dos => "DOS",
        };
        f.write_str(name)
    }
}
