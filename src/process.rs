//! Drives the whole run: discovery, per-site extraction, aggregation and
//! the final write (or print).

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use csv::Writer;
use reqwest::Client;

use crate::parse::{discover_site_ids, extract_site_records};
use crate::records::{site_name, DispensationRecord, TABLE_COLS};
use crate::request::{fetch_listing_page, fetch_site_page};
use crate::{info_time, Result};

/// Pulls the dispensation table of every site and writes the aggregate.
///
/// With an empty `site_ids` the ids are discovered from the listing page
/// first. Sites are processed strictly one after another; the aggregate
/// stacks the per-site tables in processing order. With `outfile` set the
/// aggregate goes to a CSV file, otherwise it is printed to stdout.
pub async fn run(site_ids: &[u32], outfile: Option<&Path>) -> Result<()> {
    let client = Client::new();

    let site_ids: Vec<u32> = if site_ids.is_empty() {
        let listing = fetch_listing_page(&client).await?;
        discover_site_ids(&listing)?.into_iter().collect()
    } else {
        site_ids.to_vec()
    };

    let mut aggregate = Vec::new();
    for site_id in site_ids {
        aggregate.extend(fetch_site_records(&client, site_id).await?);
    }

    match outfile {
        Some(path) => {
            info_time!("Writing output csv to {}", path.display());
            write_csv(&aggregate, File::create(path)?)?;
        }
        None => print_table(&aggregate, io::stdout().lock())?,
    }
    Ok(())
}

async fn fetch_site_records(client: &Client, site_id: u32) -> Result<Vec<DispensationRecord>> {
    match site_name(site_id) {
        Some(name) => info_time!("Parsing drug records for site_id {} ({})", site_id, name),
        None => info_time!("Parsing drug records for site_id {}", site_id),
    }

    let html = fetch_site_page(client, site_id).await?;
    let records = extract_site_records(site_id, &html)?;
    info_time!("Parsed {} drug records for site_id {}", records.len(), site_id);
    Ok(records)
}

/// Serializes the aggregate table as CSV: a leading synthetic row-index
/// column, then the six schema columns. Dates render ISO.
fn write_csv<W: io::Write>(records: &[DispensationRecord], out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);

    let mut header = vec![""];
    header.extend(TABLE_COLS);
    wtr.write_record(&header)?;

    for (idx, rec) in records.iter().enumerate() {
        wtr.write_record(&[
            idx.to_string(),
            rec.site_id.to_string(),
            rec.num.clone(),
            rec.drug.clone(),
            rec.expiration_date.clone(),
            rec.patient_id.clone(),
            rec.dispensation_date.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn print_table<W: io::Write>(records: &[DispensationRecord], mut out: W) -> Result<()> {
    writeln!(out, "{:>5}  {}", "", TABLE_COLS.join("  "))?;
    for (idx, rec) in records.iter().enumerate() {
        writeln!(
            out,
            "{:>5}  {}  {}  {}  {}  {}  {}",
            idx,
            rec.site_id,
            rec.num,
            rec.drug,
            rec.expiration_date,
            rec.patient_id,
            rec.dispensation_date,
        )?;
    }
    Ok(())
}
