// src/observation.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column order of the materialised price table.
pub const COLUMNS: [&str; 5] = ["Date", "Region", "Product", "Unit", "Price"];

/// One price found in the sheet, with whatever labels could be recovered
/// around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Observation {
    /// First day of the month the price belongs to.
    pub date: Option<NaiveDate>,
    pub region: Option<String>,
    pub product: Option<String>,
    pub unit: Option<String>,
    pub price: f64,
}

/// Round to two decimals. Exact half-cent ties go to the even cent.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
