use serde::{Deserialize, Serialize};

use crate::ingest::decoding::TextEncoding;

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Candidate encodings for delimited text, tried in order.
    pub encodings: Vec<TextEncoding>,
    /// Header names that identify the identity column, highest priority first.
    pub column_synonyms: Vec<String>,
    /// How many identities an upload summary echoes back.
    pub upload_sample_size: usize,
    /// How many identities a debug report shows next to the full lists.
    pub debug_sample_size: usize,
}

impl IngestConfig {
    pub fn v0() -> Self {
        Self {
            encodings: vec![
                TextEncoding::Utf8,
                TextEncoding::Utf8Sig,
                TextEncoding::Latin1,
                TextEncoding::Windows1252,
            ],
            column_synonyms: [
                "username",
                "kullanici_adi",
                "kullanıcı_adı",
                "user",
                "name",
                "isim",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            upload_sample_size: 5,
            debug_sample_size: 10,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::v0()
    }
}
