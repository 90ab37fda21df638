//! Data model for dispensation records and the per-row validation pipeline.

use std::fmt;

use chrono::NaiveDate;

/// Column names of the aggregate table, in schema order.
pub const TABLE_COLS: [&str; 6] = [
    "SiteID",
    "Num",
    "Drug",
    "ExpirationDate",
    "PatientID",
    "DispensationDate",
];

/// Site ids with a known display name. Reference data only, never used for
/// validation or control flow.
pub const KNOWN_SITES: [(u32, &str); 8] = [
    (5551, "HERCULES"),
    (5532, "N. CHRANIS"),
    (5543, "NIREAS"),
    (5514, "OREFEAS SKOTINAS"),
    (5547, "STONE"),
    (4623, "PAIONIA"),
    (4531, "STATE HOSPITAL KATERINI"),
    (5519, "TRANSFORMATION"),
];

pub fn site_name(site_id: u32) -> Option<&'static str> {
    KNOWN_SITES
        .iter()
        .find(|(id, _)| *id == site_id)
        .map(|(_, name)| *name)
}

/// One drug issued to one patient on one date, at one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispensationRecord {
    pub site_id: u32,
    pub num: String,
    pub drug: String,
    /// Free-form text, deliberately left unparsed.
    pub expiration_date: String,
    pub patient_id: String,
    pub dispensation_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Field count after prepending the site id, must be exactly six.
    FieldCount(usize),
    PatientPrefix,
    UnparsableDate,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::FieldCount(n) => write!(f, "expected 6 fields, got {n}"),
            RejectReason::PatientPrefix => write!(f, "patient id doesn't start with ID"),
            RejectReason::UnparsableDate => write!(f, "unparsable dispensation date"),
        }
    }
}

/// Outcome of validating one raw table row. Rejections carry the partially
/// built values so the discard can be logged with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Valid(DispensationRecord),
    Rejected {
        values: Vec<String>,
        reason: RejectReason,
    },
}

/// Validates one row of a site page: the site id prepended to the cell
/// texts in document order. All three checks must pass:
/// 1. exactly six fields in total,
/// 2. the patient id field starts with the literal `ID`,
/// 3. the dispensation date parses day-first; the parsed date replaces the
///    text in the resulting record.
pub fn validate_row(site_id: u32, cells: &[String]) -> RowOutcome {
    if cells.len() != TABLE_COLS.len() - 1 {
        return reject(site_id, cells, RejectReason::FieldCount(cells.len() + 1));
    }
    if !cells[3].starts_with("ID") {
        return reject(site_id, cells, RejectReason::PatientPrefix);
    }
    let Some(dispensation_date) = parse_day_first_date(&cells[4]) else {
        return reject(site_id, cells, RejectReason::UnparsableDate);
    };

    RowOutcome::Valid(DispensationRecord {
        site_id,
        num: cells[0].clone(),
        drug: cells[1].clone(),
        expiration_date: cells[2].clone(),
        patient_id: cells[3].clone(),
        dispensation_date,
    })
}

fn reject(site_id: u32, cells: &[String], reason: RejectReason) -> RowOutcome {
    let mut values = Vec::with_capacity(cells.len() + 1);
    values.push(site_id.to_string());
    values.extend(cells.iter().cloned());
    RowOutcome::Rejected { values, reason }
}

/// Layouts the pages have been seen using, all day-before-month.
const DAY_FIRST_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Day-first date parsing: `"05/03/2024"` is the 5th of March, not May 3rd.
pub fn parse_day_first_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DAY_FIRST_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(vals: &[&str]) -> Vec<String> {
        vals.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn day_first_not_month_first() {
        assert_eq!(
            parse_day_first_date("05/03/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn day_first_accepts_seen_separators() {
        let expected = NaiveDate::from_ymd_opt(1999, 12, 31);
        assert_eq!(parse_day_first_date("31/12/1999"), expected);
        assert_eq!(parse_day_first_date("31-12-1999"), expected);
        assert_eq!(parse_day_first_date("31.12.1999"), expected);
        assert_eq!(parse_day_first_date(" 31/12/1999 "), expected);
    }

    #[test]
    fn day_first_rejects_garbage() {
        assert_eq!(parse_day_first_date("soon"), None);
        assert_eq!(parse_day_first_date("32/01/2024"), None);
        assert_eq!(parse_day_first_date(""), None);
    }

    #[test]
    fn valid_row_replaces_date_text() {
        let row = cells(&["17", "Aspirin", "06/2025", "ID0042", "05/03/2024"]);
        match validate_row(5551, &row) {
            RowOutcome::Valid(rec) => {
                assert_eq!(rec.site_id, 5551);
                assert_eq!(rec.num, "17");
                assert_eq!(rec.drug, "Aspirin");
                assert_eq!(rec.expiration_date, "06/2025");
                assert_eq!(rec.patient_id, "ID0042");
                assert_eq!(
                    rec.dispensation_date,
                    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
                );
            }
            other => panic!("expected valid row, got {other:?}"),
        }
    }

    #[test]
    fn short_row_rejected_with_field_count() {
        let row = cells(&["17", "Aspirin", "ID0042", "05/03/2024"]);
        match validate_row(5551, &row) {
            RowOutcome::Rejected { values, reason } => {
                assert_eq!(reason, RejectReason::FieldCount(5));
                // Site id is prepended before the discard is reported.
                assert_eq!(values[0], "5551");
                assert_eq!(values.len(), 5);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn bad_patient_prefix_rejected() {
        let row = cells(&["17", "Aspirin", "06/2025", "XX0042", "05/03/2024"]);
        match validate_row(5551, &row) {
            RowOutcome::Rejected { reason, .. } => {
                assert_eq!(reason, RejectReason::PatientPrefix);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_rejected() {
        let row = cells(&["17", "Aspirin", "06/2025", "ID0042", "yesterday"]);
        match validate_row(5551, &row) {
            RowOutcome::Rejected { reason, .. } => {
                assert_eq!(reason, RejectReason::UnparsableDate);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn known_site_lookup() {
        assert_eq!(site_name(5551), Some("HERCULES"));
        assert_eq!(site_name(1), None);
    }
}
