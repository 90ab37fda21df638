//! Turns page markup into site ids and dispensation records.
//!
//! Pure functions over the raw HTML, so they can be tested without a
//! network in sight.

use std::collections::BTreeSet;

use chrono::Local;
use scraper::{ElementRef, Html, Selector};

use crate::records::{validate_row, DispensationRecord, RowOutcome};
use crate::{info_time, Error, Result};

/// Extracts the set of site ids from the listing page: the third `<td>` of
/// every `<tr>`, kept when it parses as an integer. Duplicates collapse.
/// Rows that are short on cells or carry a non-integer value are logged and
/// skipped, never fatal.
pub fn discover_site_ids(html: &str) -> Result<BTreeSet<u32>> {
    let doc = Html::parse_document(html);
    let row_selector = create_selector("tr")?;
    let cell_selector = create_selector("td")?;

    let mut site_ids = BTreeSet::new();
    for row in doc.select(&row_selector) {
        let Some(cell) = row.select(&cell_selector).nth(2) else {
            info_time!("No site id cell in row: {}", row.html());
            continue;
        };
        let text = cell_text(&cell);
        match text.parse::<u32>() {
            Ok(id) => {
                site_ids.insert(id);
            }
            Err(_) => info_time!("Discarding non-integer site id value {:?}", text),
        }
    }

    info_time!("Found {} site ids", site_ids.len());
    Ok(site_ids)
}

/// Extracts the valid dispensation records from one site page, in document
/// order. Every `<tr>` becomes a candidate row (site id + cell texts) and
/// runs through [`validate_row`]; rejected rows are logged with their
/// values and the reason, then skipped. Zero valid rows is fine.
pub fn extract_site_records(site_id: u32, html: &str) -> Result<Vec<DispensationRecord>> {
    let doc = Html::parse_document(html);
    let row_selector = create_selector("tr")?;
    let cell_selector = create_selector("td")?;

    let mut records = Vec::new();
    for row in doc.select(&row_selector) {
        let cells: Vec<String> = row.select(&cell_selector).map(|td| cell_text(&td)).collect();
        match validate_row(site_id, &cells) {
            RowOutcome::Valid(record) => records.push(record),
            RowOutcome::Rejected { values, reason } => {
                info_time!("Discarding row ({reason}): {:?}", values);
            }
        }
    }
    Ok(records)
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
