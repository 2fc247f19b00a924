pub mod columns;
pub mod decoding;
pub mod tabular;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::IngestConfig;
use crate::types::identifiers::CanonicalIdentity;
pub use columns::{select_column, ColumnChoice};
pub use decoding::{decode_with_fallback, TextEncoding};
pub use tabular::{read_delimited, read_spreadsheet, Table};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("Could not parse upload: {0}")]
    Parse(String),
    #[error("No valid identities found in upload")]
    EmptyResult,
}

/// Upload format, derived from the declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    DelimitedText,
    Spreadsheet,
}

impl MediaKind {
    /// Anything mentioning csv is delimited text; everything else is read as a workbook.
    pub fn classify(media_type: &str) -> Self {
        if media_type.to_lowercase().contains("csv") {
            MediaKind::DelimitedText
        } else {
            MediaKind::Spreadsheet
        }
    }
}

/// Turns uploaded tabular bytes into canonical identities.
///
/// Stateless apart from its configuration; safe to share across requests.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Parse, select the identity column and normalize every cell.
    ///
    /// Output keeps file row order and keeps duplicates. Fails with
    /// [`IngestError::EmptyResult`] when no cell survives normalization.
    pub fn ingest(
        &self,
        bytes: &[u8],
        media_type: &str,
    ) -> Result<Vec<CanonicalIdentity>, IngestError> {
        let table = self.read_table(bytes, media_type)?;
        info!(
            rows = table.rows.len(),
            columns = ?table.headers,
            "file read successfully"
        );

        let choice = select_column(&table.headers, &self.config.column_synonyms);
        let column = choice.index();
        let header = table.headers.get(column).map(String::as_str).unwrap_or_default();
        match choice {
            ColumnChoice::Synonym { .. } => info!(column = header, "found identity column"),
            ColumnChoice::FirstColumn => {
                info!(column = header, "using first column as identity column")
            }
        }

        let raw: Vec<&str> = table.column_values(column).collect();
        debug!(count = raw.len(), sample = ?sample(&raw, 3), "raw identities");

        let identities: Vec<CanonicalIdentity> = raw
            .into_iter()
            .filter_map(|value| CanonicalIdentity::parse(value))
            .collect();
        debug!(
            count = identities.len(),
            sample = ?sample(&identities, 3),
            "normalized identities"
        );

        if identities.is_empty() {
            return Err(IngestError::EmptyResult);
        }

        Ok(identities)
    }

    fn read_table(&self, bytes: &[u8], media_type: &str) -> Result<Table, IngestError> {
        match MediaKind::classify(media_type) {
            MediaKind::DelimitedText => {
                let (text, encoding) = decode_with_fallback(bytes, &self.config.encodings)?;
                debug!(encoding = encoding.label(), "decoded delimited upload");
                read_delimited(&text)
            }
            MediaKind::Spreadsheet => read_spreadsheet(bytes),
        }
    }
}

fn sample<T>(items: &[T], n: usize) -> &[T] {
    &items[..items.len().min(n)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_media_types() {
        assert_eq!(MediaKind::classify("text/csv"), MediaKind::DelimitedText);
        assert_eq!(MediaKind::classify("application/CSV; charset=utf-8"), MediaKind::DelimitedText);
        assert_eq!(
            MediaKind::classify("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            MediaKind::Spreadsheet
        );
        assert_eq!(MediaKind::classify(""), MediaKind::Spreadsheet);
    }
}
