//! Text encodings accepted for the data file.

use std::fmt;
use std::str::FromStr;

use crate::error::{DatasetError, Result};

/// Encoding of the CSV inside the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// ISO-8859-1. Every byte is the code point of the same value.
    #[default]
    Latin1,
    Utf8,
}

impl TextEncoding {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Utf8 => "UTF-8",
        }
    }

    /// Decode raw file bytes.
    ///
    /// # Errors
    ///
    /// `Decode` if the bytes are not valid UTF-8 (Latin-1 accepts every byte).
    pub fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        match self {
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
            Self::Utf8 => String::from_utf8(bytes).map_err(|e| DatasetError::Decode {
                encoding: self.as_str(),
                reason: e.utf8_error().to_string(),
            }),
        }
    }

    /// Encode text for writing a data file.
    ///
    /// # Errors
    ///
    /// `Encode` for characters above U+00FF under Latin-1.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| DatasetError::Encode {
                        encoding: self.as_str(),
                        character: c,
                    })
                })
                .collect(),
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(Self::Latin1),
            "utf8" | "utf-8" => Ok(Self::Utf8),
            other => Err(DatasetError::UnknownEncoding(other.to_string())),
        }
    }
}
