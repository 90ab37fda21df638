use std::path::Path;

use chrono::Local;
use clap::Parser;
use social_pharma::{info_time, process, Result};

/// Pulls the dispensation records of every social pharmacy site into one CSV.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Output file path.
    #[arg(short, long, default_value_t = default_outfile())]
    outfile: String,

    /// Explicit site ids; when omitted the ids are discovered from the
    /// listing page.
    #[arg(short, long, num_args = 0.., value_name = "SITE_ID")]
    site_ids: Vec<u32>,
}

fn default_outfile() -> String {
    format!("social_pharma_{}.csv", Local::now().date_naive())
}

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let args = Args::parse();

    process::run(&args.site_ids, Some(Path::new(&args.outfile))).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
