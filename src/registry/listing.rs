//! Pure parsing of the registry's rendered results page.
//!
//! Knows where the ground truth lives in the HTML — one study per
//! `table tbody tr`, fixed cell positions — and nothing about browsers,
//! so it is testable offline against captured markup. The cell layout is
//! brittle by construction: if the registry reorders its columns, this
//! parser reads the wrong fields.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use super::types::TrialRecord;
use super::RegistryError;

/// Selector for one study row in the rendered results table.
pub const ROW_SELECTOR: &str = "table tbody tr";

/// 1-based cell positions of the fields within a study row.
const TITLE_CELL: usize = 2;
const NCT_CELL: usize = 3;
const STATUS_CELL: usize = 4;
const CONDITIONS_CELL: usize = 5;

/// Build the search URL for currently recruiting studies of one condition.
pub fn search_url(base: &str, condition: &str) -> Result<Url, RegistryError> {
    Url::parse_with_params(base, &[("cond", condition), ("recrs", "open")])
        .map_err(|e| RegistryError::InvalidUrl(e.to_string()))
}

/// Extract one `TrialRecord` per table row from the snapshotted page.
///
/// A page without rows parses to an empty list. A row that is present but
/// too short to carry the expected columns is a fault, not a skip.
pub fn parse_listing(html: &str) -> Result<Vec<TrialRecord>, RegistryError> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse(ROW_SELECTOR).expect("row selector is valid");
    let cell_selector = Selector::parse("td").expect("cell selector is valid");

    let mut trials = Vec::new();
    for (index, row) in document.select(&row_selector).enumerate() {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < CONDITIONS_CELL {
            return Err(RegistryError::MalformedRow {
                row: index + 1,
                found: cells.len(),
            });
        }
        trials.push(TrialRecord {
            study_title: cell_text(cells[TITLE_CELL - 1]),
            nct_number: cell_text(cells[NCT_CELL - 1]),
            status: cell_text(cells[STATUS_CELL - 1]),
            conditions: cell_text(cells[CONDITIONS_CELL - 1]),
        });
    }
    Ok(trials)
}

/// Text of one cell with markup stripped and whitespace collapsed.
fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
