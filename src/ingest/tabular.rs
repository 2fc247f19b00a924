use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::IngestError;

/// Cell texts treated as missing, matching what common spreadsheet tooling
/// reads as null.
const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A header row plus data rows. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Non-missing values of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).and_then(|cell| cell.as_deref()))
    }
}

fn cell_value(raw: &str) -> Option<String> {
    if raw.trim().is_empty() || NULL_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

fn header_name(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// Parse comma-separated text whose first record is the header.
pub fn read_delimited(text: &str) -> Result<Table, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Parse(format!("invalid header row: {e}")))?
        .iter()
        .map(header_name)
        .collect();

    if headers.is_empty() {
        return Err(IngestError::Parse("no columns to parse from file".into()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Parse(format!("invalid row: {e}")))?;
        rows.push(record.iter().map(cell_value).collect());
    }

    Ok(Table { headers, rows })
}

/// Parse the first worksheet of an xlsx/xls/ods workbook; its first row is the header.
pub fn read_spreadsheet(bytes: &[u8]) -> Result<Table, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| IngestError::Parse(format!("unreadable workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::Parse("workbook has no worksheets".into()))?
        .map_err(|e| IngestError::Parse(format!("unreadable worksheet: {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| IngestError::Parse("no columns to parse from file".into()))?
        .iter()
        .map(|cell| header_name(&cell.to_string()))
        .collect();

    let rows = rows
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok(Table { headers, rows })
}

fn spreadsheet_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => cell_value(s),
        other => cell_value(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_reads_header_and_rows() {
        let table = read_delimited("username,full\nalice,Alice A\nbob,Bob B\n").unwrap();
        assert_eq!(table.headers, vec!["username", "full"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column_values(1).collect::<Vec<_>>(), vec!["Alice A", "Bob B"]);
    }

    #[test]
    fn short_rows_yield_missing_cells() {
        let table = read_delimited("a,b\n1\n2,3\n").unwrap();
        assert_eq!(table.column_values(1).collect::<Vec<_>>(), vec!["3"]);
    }

    #[test]
    fn null_markers_and_blanks_are_missing() {
        let table = read_delimited("user\nNaN\n   \nnull\nreal\n").unwrap();
        assert_eq!(table.column_values(0).collect::<Vec<_>>(), vec!["real"]);
    }

    #[test]
    fn empty_input_has_no_columns() {
        assert!(matches!(read_delimited(""), Err(IngestError::Parse(_))));
    }

    #[test]
    fn bom_is_stripped_from_header() {
        let table = read_delimited("\u{feff}username\nx\n").unwrap();
        assert_eq!(table.headers, vec!["username"]);
    }

    #[test]
    fn garbage_workbook_is_parse_error() {
        assert!(matches!(
            read_spreadsheet(b"definitely not a workbook"),
            Err(IngestError::Parse(_))
        ));
    }
}
