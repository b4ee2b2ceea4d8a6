// src/extract/row.rs

use crate::workbook::Cell;

/// Region labels that segment the price blocks, matched exactly.
pub const REGIONS: [&str; 6] = ["GBA", "Pampeana", "Noreste", "Noroeste", "Cuyo", "Patagonia"];

/// Labels recovered from the row a price sits on.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowLabels {
    pub region: Option<String>,
    pub product: Option<String>,
    pub unit: Option<String>,
}

fn is_region(text: &str) -> bool {
    REGIONS.contains(&text)
}

fn first_text_from(row: &[Cell], start: usize) -> Option<&str> {
    row.iter().skip(start).find_map(Cell::as_text)
}

/// Find region, product and unit for one row.
///
/// With a region label at `i`: product is the first text after `i`, unit is
/// the first text from `i + 2` on (it can be the product cell itself), and
/// with nothing there the unit repeats the product.
///
/// Without a region label: region and product are read from the first two
/// cells when they hold text, and the unit repeats the product.
pub fn resolve_row_labels(row: &[Cell]) -> RowLabels {
    let region_at = row
        .iter()
        .position(|c| c.as_text().map_or(false, is_region));

    match region_at {
        Some(i) => {
            let product = first_text_from(row, i + 1).map(str::to_string);
            let unit = first_text_from(row, i + 2)
                .map(str::to_string)
                .or_else(|| product.clone());
            RowLabels {
                region: row[i].as_text().map(str::to_string),
                product,
                unit,
            }
        }
        None => {
            let region = row.first().and_then(Cell::as_text).map(str::to_string);
            let product = row.get(1).and_then(Cell::as_text).map(str::to_string);
            RowLabels {
                region,
                unit: product.clone(),
                product,
            }
        }
    }
}
