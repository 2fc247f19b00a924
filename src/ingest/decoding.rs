use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::IngestError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encodings tried, in configured order, when decoding delimited uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-8 with a leading byte-order mark stripped.
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    #[serde(rename = "latin1")]
    Latin1,
    #[serde(rename = "cp1252")]
    Windows1252,
}

impl TextEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Windows1252 => "cp1252",
        }
    }

    /// Decode the whole payload, or `None` if any byte sequence is invalid.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Utf8 => {
                encoding_rs::UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
            }
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                encoding_rs::UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            TextEncoding::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())),
            TextEncoding::Windows1252 => {
                encoding_rs::WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

/// Decode with the first candidate that accepts the entire payload.
pub fn decode_with_fallback<'a>(
    bytes: &'a [u8],
    candidates: &[TextEncoding],
) -> Result<(Cow<'a, str>, TextEncoding), IngestError> {
    for encoding in candidates {
        match encoding.decode(bytes) {
            Some(text) => return Ok((text, *encoding)),
            None => tracing::debug!(encoding = encoding.label(), "decode attempt failed"),
        }
    }

    let tried: Vec<&str> = candidates.iter().map(TextEncoding::label).collect();
    Err(IngestError::Parse(format!(
        "could not decode delimited text with any of [{}]",
        tried.join(", ")
    )))
}
