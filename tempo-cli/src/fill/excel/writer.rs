//! Write resolved account keys back into the spreadsheet
//!
//! The workbook is rebuilt cell by cell and saved once at the end, so a
//! failure anywhere before the save leaves the original file untouched.
//! Only the first sheet is matched against the account index; every
//! other sheet is copied through unchanged.

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::fill::AccountIndex;

use super::{issue_key_text, layout, row_is_blank};

/// Fill the account column of every matched row, returning how many
/// rows were written
pub fn write_account_keys(path: &Path, index: &AccountIndex, account_col: u16) -> Result<usize> {
    let mut source: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_names: Vec<String> = source.sheet_names().to_vec();
    if sheet_names.is_empty() {
        bail!("Excel file has no sheets: {}", path.display());
    }

    let mut workbook = Workbook::new();
    let mut filled = 0;

    for (sheet_idx, sheet_name) in sheet_names.iter().enumerate() {
        let range = source
            .worksheet_range(sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        let (start_row, start_col) = match range.start() {
            Some((row, col)) => (row as usize, col as usize),
            None => continue, // sheet has no cells, keep it empty
        };

        for (offset, row) in range.rows().enumerate() {
            let row_idx = start_row + offset;
            for (cell_offset, cell) in row.iter().enumerate() {
                copy_cell(worksheet, row_idx as u32, (start_col + cell_offset) as u16, cell)?;
            }

            if sheet_idx != 0 || row_idx < layout::FIRST_DATA_ROW || row_is_blank(row) {
                continue;
            }
            let key = match issue_key_text(row, start_col) {
                Some(key) => key,
                None => continue, // blank or unreadable key, leave the row alone
            };
            if let Some(account) = index.get(&key) {
                worksheet.write_string(row_idx as u32, account_col, &account.key)?;
                filled += 1;
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    Ok(filled)
}

fn copy_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Data) -> Result<()> {
    match cell {
        Data::Empty => { /* Leave cell empty */ }
        Data::String(s) => { ws.write_string(row, col, s)?; }
        Data::Float(f) => { ws.write_number(row, col, *f)?; }
        Data::Int(i) => { ws.write_number(row, col, *i as f64)?; }
        Data::Bool(b) => { ws.write_boolean(row, col, *b)?; }
        Data::DateTime(dt) => { ws.write_number(row, col, dt.as_f64())?; }
        Data::DateTimeIso(s) => { ws.write_string(row, col, s)?; }
        Data::DurationIso(s) => { ws.write_string(row, col, s)?; }
        Data::Error(_) => { /* Formula errors cannot be carried over */ }
    }
    Ok(())
}
