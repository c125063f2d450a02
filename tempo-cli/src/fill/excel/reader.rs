//! Read issue keys from the spreadsheet
//!
//! Each non-blank data row of the first sheet yields one outcome: the
//! issue key text, or a row-level error. Bad rows never abort the read;
//! the caller decides how to report them.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};

use super::{RowError, RowOutcome, issue_key_cell, layout, row_is_blank};

/// Collect one outcome per data row of the first sheet
pub fn read_issue_keys(path: &Path) -> Result<Vec<RowOutcome>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .with_context(|| format!("Excel file has no sheets: {}", path.display()))?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut outcomes = Vec::new();
    let (start_row, start_col) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return Ok(outcomes), // sheet has no cells
    };

    for (offset, row) in range.rows().enumerate() {
        let row_idx = start_row + offset;
        if row_idx < layout::FIRST_DATA_ROW {
            continue; // header
        }
        if row_is_blank(row) {
            continue;
        }

        let row_num = row_idx + 1; // 1-based for error messages
        match issue_key_cell(row, start_col) {
            None | Some(Data::Empty) => continue,
            Some(Data::String(s)) if s.trim().is_empty() => continue,
            Some(Data::String(s)) => outcomes.push(Ok(s.trim().to_string())),
            Some(other) => outcomes.push(Err(RowError {
                row: row_num,
                message: format!("issue key cell is not text (found '{}')", other),
            })),
        }
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    #[test]
    fn test_read_skips_header_and_blank_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("issues.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Issue").unwrap();
        sheet.write_string(1, 0, "PROJ-1").unwrap();
        // row 2 left entirely empty
        sheet.write_string(3, 0, "   ").unwrap();
        sheet.write_string(4, 0, "  PROJ-2 ").unwrap();
        workbook.save(&path).unwrap();

        let outcomes = read_issue_keys(&path).unwrap();
        let keys: Vec<String> = outcomes.into_iter().map(|o| o.unwrap()).collect();
        assert_eq!(keys, vec!["PROJ-1".to_string(), "PROJ-2".to_string()]);
    }

    #[test]
    fn test_read_reports_non_text_cells_without_aborting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("issues.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Issue").unwrap();
        sheet.write_string(1, 0, "PROJ-1").unwrap();
        sheet.write_number(2, 0, 42.0).unwrap();
        sheet.write_string(3, 0, "PROJ-2").unwrap();
        workbook.save(&path).unwrap();

        let outcomes = read_issue_keys(&path).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0], Ok("PROJ-1".to_string()));
        let error = outcomes[1].clone().unwrap_err();
        assert_eq!(error.row, 3);
        assert!(error.message.contains("not text"), "{}", error.message);
        assert_eq!(outcomes[2], Ok("PROJ-2".to_string()));
    }

    #[test]
    fn test_read_skips_rows_with_blank_key_but_other_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("issues.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Issue").unwrap();
        sheet.write_string(1, 1, "a note, no key").unwrap();
        sheet.write_string(2, 0, "PROJ-9").unwrap();
        workbook.save(&path).unwrap();

        let outcomes = read_issue_keys(&path).unwrap();
        assert_eq!(outcomes, vec![Ok("PROJ-9".to_string())]);
    }

    #[test]
    fn test_read_header_only_sheet_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("issues.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Issue").unwrap();
        workbook.save(&path).unwrap();

        assert!(read_issue_keys(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_empty_sheet_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("issues.xlsx");

        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).unwrap();

        assert!(read_issue_keys(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.xlsx");
        assert!(read_issue_keys(&path).is_err());
    }
}
