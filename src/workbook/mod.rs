// src/workbook/mod.rs

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto_from_rs, Reader};
use std::io::Cursor;
use tracing::{debug, warn};

pub mod grid;

pub use grid::{Cell, Grid};

/// True when `bytes` open as a workbook whose sheets can be listed.
/// The opened handle is dropped before returning.
pub fn is_valid(bytes: &[u8]) -> bool {
    match open_workbook_auto_from_rs(Cursor::new(bytes)) {
        Ok(workbook) => {
            debug!(sheets = workbook.sheet_names().len(), "workbook opened");
            true
        }
        Err(e) => {
            debug!(error = %e, "content is not a readable workbook");
            false
        }
    }
}

/// Case-insensitive lookup of `wanted`, falling back to the first sheet.
/// `None` only when there are no sheets at all.
pub fn find_sheet<'a>(names: &'a [String], wanted: &str) -> Option<&'a str> {
    let wanted_lower = wanted.to_lowercase();
    names
        .iter()
        .find(|name| name.to_lowercase() == wanted_lower)
        .or_else(|| {
            warn!(
                sheet = wanted,
                "sheet not found; using the first available sheet"
            );
            names.first()
        })
        .map(String::as_str)
}

/// Read the sheet matching `wanted` (see [`find_sheet`]) into a [`Grid`].
/// Returns the resolved sheet name alongside the grid.
pub fn read_grid(bytes: &[u8], wanted: &str) -> Result<(String, Grid)> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).context("opening workbook from bytes")?;
    let names = workbook.sheet_names();
    let sheet = find_sheet(&names, wanted)
        .ok_or_else(|| anyhow!("workbook has no sheets"))?
        .to_string();

    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("reading sheet {:?}", sheet))?;
    let grid = Grid::from_range(&range);
    debug!(
        sheet = %sheet,
        rows = grid.height(),
        cols = grid.width(),
        "sheet loaded"
    );
    Ok((sheet, grid))
}
