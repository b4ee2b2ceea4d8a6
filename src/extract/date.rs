// src/extract/date.rs

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::workbook::Grid;

/// Spanish month labels as they appear in the sheet headers.
const MONTHS: [(&str, u32); 12] = [
    ("Enero", 1),
    ("Febrero", 2),
    ("Marzo", 3),
    ("Abril", 4),
    ("Mayo", 5),
    ("Junio", 6),
    ("Julio", 7),
    ("Agosto", 8),
    ("Septiembre", 9),
    ("Octubre", 10),
    ("Noviembre", 11),
    ("Diciembre", 12),
];

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)año (\d{4})").expect("year pattern should compile"));

/// Exact month label → month number.
pub fn parse_month(label: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, n)| *n)
}

/// `"Año 2021"` (any case, trailing text allowed) → `2021`.
pub fn parse_year(label: &str) -> Option<i32> {
    YEAR_RE
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Most recent year label seen so far during one extraction pass.
///
/// Carried across columns so that a column holding only month labels
/// inherits the year of an earlier column.
#[derive(Debug, Default, Clone, Copy)]
pub struct YearTracker {
    last: Option<i32>,
}

impl YearTracker {
    pub fn last(&self) -> Option<i32> {
        self.last
    }

    fn see(&mut self, year: i32) {
        self.last = Some(year);
    }
}

/// Resolve the date that labels every price in column `col`.
///
/// Walks the column top to bottom keeping the latest month label and stops
/// once a year label has also been found. Every year label read updates
/// `years`; a month without a year in this column borrows `years.last()`.
pub fn resolve_column_date(grid: &Grid, col: usize, years: &mut YearTracker) -> Option<NaiveDate> {
    let mut month = None;
    let mut year = None;

    for text in grid.column(col).filter_map(|c| c.as_text()) {
        if let Some(m) = parse_month(text) {
            month = Some(m);
        } else if let Some(y) = parse_year(text) {
            year = Some(y);
            years.see(y);
        }
        if month.is_some() && year.is_some() {
            break;
        }
    }

    let month = month?;
    let year = year.or(years.last())?;
    NaiveDate::from_ymd_opt(year, month, 1)
}
