//! README preview values.

use crate::forge::{ForgeError, ReadmePayload};
use crate::normalize::normalize_readme;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder for repositories without a README.
pub const NO_README: &str = "No README found";

/// Placeholder for READMEs that could not be retrieved or decoded.
pub const README_ERROR: &str = "Error fetching README";

/// README column value for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeContent {
    /// Normalised, truncated README text.
    Preview(String),
    /// The repository has no README, or it is empty.
    NotFound,
    /// The README could not be fetched or decoded.
    Unavailable,
}

impl ReadmeContent {
    /// Decodes a README payload into a preview.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Decode`] for unsupported encodings, invalid
    /// base64 or non UTF-8 content.
    pub fn from_payload(payload: &ReadmePayload) -> Result<Self, ForgeError> {
        let text = match payload.encoding.as_deref() {
            Some("base64") | None => decode_base64(&payload.content)?,
            Some(other) => {
                return Err(ForgeError::Decode(format!(
                    "unsupported README encoding '{other}'"
                )))
            }
        };

        Ok(Self::from_text(&text))
    }

    /// Builds a preview from raw README text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let preview = normalize_readme(text);
        if preview.is_empty() {
            Self::NotFound
        } else {
            Self::Preview(preview)
        }
    }

    /// Returns the text written to the export.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Preview(text) => text,
            Self::NotFound => NO_README,
            Self::Unavailable => README_ERROR,
        }
    }
}

impl fmt::Display for ReadmeContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReadmeContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Decodes GitHub's base64 content, which is wrapped with newlines.
fn decode_base64(content: &str) -> Result<String, ForgeError> {
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| ForgeError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ForgeError::Decode(e.to_string()))
}
