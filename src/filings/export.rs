//! CSV export of the visible filings.

use crate::models::Filing;
use crate::utils::Timer;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

pub const HEADERS: [&str; 11] = [
    "Company",
    "Ticker",
    "Insider Name",
    "Position",
    "Transaction Type",
    "Shares",
    "Price",
    "Total Value",
    "Holdings Change (%)",
    "Filing Date",
    "Transaction Date",
];

/// "sec-form4-filings-2024-08-30.csv"
pub fn export_filename(date: NaiveDate) -> String {
    format!("sec-form4-filings-{}.csv", date.format("%Y-%m-%d"))
}

fn write_rows<W: std::io::Write>(out: W, filings: &[Filing]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(HEADERS)?;
    for f in filings {
        writer
            .write_record([
                f.company.clone(),
                f.ticker.clone(),
                f.insider.clone(),
                f.title.clone(),
                f.transaction_type.to_string(),
                f.shares.to_string(),
                f.price.to_string(),
                f.total_value.to_string(),
                f.shareholding_change.to_string(),
                f.filing_date.to_string(),
                f.transaction_date.to_string(),
            ])
            .with_context(|| format!("write csv row for filing {}", f.id))?;
    }
    writer.flush()?;
    Ok(())
}

/// Render filings as a CSV blob: header row, then one row per filing.
pub fn to_csv(filings: &[Filing]) -> Result<String> {
    let mut buf = Vec::new();
    write_rows(&mut buf, filings)?;
    String::from_utf8(buf).context("csv output was not UTF-8")
}

/// Write the export file into `dir`, named after `date`. Returns its path.
pub fn write_export(dir: &Path, date: NaiveDate, filings: &[Filing]) -> Result<PathBuf> {
    let _t = Timer::start("CSV export");
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create export dir {:?}", dir))?;

    let path = dir.join(export_filename(date));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Could not create {:?}", path))?;
    write_rows(file, filings)?;

    info!("Exported {} filings to {:?}", filings.len(), path);
    Ok(path)
}
