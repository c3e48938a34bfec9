use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Line terminator appended after every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineTerminator {
    /// The terminator native to the target platform.
    pub const fn platform() -> Self {
        if cfg!(windows) {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    /// Raw bytes written after a frame.
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Lf => b"\n",
            Self::CrLf => b"\r\n",
        }
    }

    /// Number of bytes the terminator occupies on the wire.
    pub const fn byte_len(self) -> usize {
        self.as_bytes().len()
    }
}

impl Default for LineTerminator {
    fn default() -> Self {
        Self::platform()
    }
}

impl fmt::Display for LineTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("lf"),
            Self::CrLf => f.write_str("crlf"),
        }
    }
}

/// Error returned when parsing an unknown terminator name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown line terminator {0:?} (expected lf, crlf or platform)")]
pub struct ParseTerminatorError(String);

impl FromStr for LineTerminator {
    type Err = ParseTerminatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lf" => Ok(Self::Lf),
            "crlf" => Ok(Self::CrLf),
            "platform" | "native" => Ok(Self::platform()),
            _ => Err(ParseTerminatorError(s.to_string())),
        }
    }
}
