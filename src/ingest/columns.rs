/// How the identity column was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnChoice {
    /// A header matched the synonym at this priority position.
    Synonym { column: usize, priority: usize },
    /// Nothing matched; the first column is used whatever its name.
    FirstColumn,
}

impl ColumnChoice {
    pub fn index(&self) -> usize {
        match self {
            ColumnChoice::Synonym { column, .. } => *column,
            ColumnChoice::FirstColumn => 0,
        }
    }
}

/// Pick the identity column.
///
/// Synonyms are evaluated top to bottom and the first one present among the
/// headers wins, so synonym priority beats column position. Header comparison
/// is case-insensitive and ignores surrounding whitespace.
pub fn select_column(headers: &[String], synonyms: &[String]) -> ColumnChoice {
    let folded: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    for (priority, synonym) in synonyms.iter().enumerate() {
        let wanted = synonym.trim().to_lowercase();
        if let Some(column) = folded.iter().position(|h| *h == wanted) {
            return ColumnChoice::Synonym { column, priority };
        }
    }

    ColumnChoice::FirstColumn
}
