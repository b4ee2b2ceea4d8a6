// src/extract/mod.rs

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::observation::{round_price, Observation};
use crate::workbook::{self, Grid};

pub mod date;
pub mod row;

use date::{resolve_column_date, YearTracker};
use row::resolve_row_labels;

/// Read `sheet` (case-insensitive, falling back to the first sheet) from
/// the workbook in `bytes` and extract every price in it.
#[instrument(level = "info", skip(bytes), fields(size = bytes.len()))]
pub fn extract(bytes: &[u8], sheet: &str) -> Result<Vec<Observation>> {
    let (resolved, grid) = workbook::read_grid(bytes, sheet)?;
    let observations = extract_grid(&grid);
    info!(
        sheet = %resolved,
        rows = observations.len(),
        "extracted price observations"
    );
    Ok(observations)
}

/// Scan the grid column by column, top to bottom, and emit one
/// [`Observation`] per strictly positive numeric cell.
///
/// The date comes from month/year labels in the price's column, the region,
/// product and unit from labels in its row.
pub fn extract_grid(grid: &Grid) -> Vec<Observation> {
    let mut years = YearTracker::default();
    let mut out = Vec::new();

    for col in 0..grid.width() {
        // resolved on the first price of the column; a column without
        // prices never feeds the year tracker
        let mut column_date: Option<Option<NaiveDate>> = None;

        for (row_idx, cell) in grid.column(col).enumerate() {
            let Some(price) = cell.as_number().filter(|v| *v > 0.0) else {
                continue;
            };

            let date = *column_date.get_or_insert_with(|| {
                let d = resolve_column_date(grid, col, &mut years);
                debug!(col, date = ?d, last_year = ?years.last(), "column date");
                d
            });
            let labels = resolve_row_labels(grid.row(row_idx));

            out.push(Observation {
                date,
                region: labels.region,
                product: labels.product,
                unit: labels.unit,
                price: round_price(price),
            });
        }
    }

    out
}
