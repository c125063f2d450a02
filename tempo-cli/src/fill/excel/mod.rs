//! Excel access for the fill workflow
//!
//! The first sheet of the workbook carries Jira issue keys in column A,
//! with row 1 reserved for headers. Reading collects per-row outcomes,
//! writing rebuilds the whole workbook and saves it once at the end.

pub mod reader;
pub mod writer;

use calamine::Data;

/// Fixed sheet geometry
pub mod layout {
    /// Column that holds the issue key
    pub const ISSUE_KEY_COL: usize = 0;
    /// First data row; the row above it is the header
    pub const FIRST_DATA_ROW: usize = 1;
    /// Column that receives the account key unless overridden
    pub const DEFAULT_ACCOUNT_COL: u16 = 1;
}

/// A row that could not be read, with its 1-based row number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

/// Outcome of reading one data row: the issue key, or a row-level error
pub type RowOutcome = Result<String, RowError>;

/// True when every cell of the row is empty or whitespace-only text
pub(crate) fn row_is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// The issue-key cell of a row slice whose leftmost cell is `start_col`
pub(crate) fn issue_key_cell(row: &[Data], start_col: usize) -> Option<&Data> {
    layout::ISSUE_KEY_COL
        .checked_sub(start_col)
        .and_then(|idx| row.get(idx))
}

/// Trimmed issue key of a row, `None` when blank or not a text cell
pub(crate) fn issue_key_text(row: &[Data], start_col: usize) -> Option<String> {
    match issue_key_cell(row, start_col) {
        Some(Data::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}
