use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{DistributionRow, SieveId};

/// One exported line of the distribution table.
#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    #[serde(rename = "Sieve")]
    sieve: &'a SieveId,
    #[serde(rename = "Opening (mm)")]
    opening_mm: f64,
    #[serde(rename = "Retained mass (g)")]
    retained_mass_g: f64,
    #[serde(rename = "Cumulative mass (g)")]
    cumulative_mass_g: f64,
    #[serde(rename = "Percent passing (%)")]
    percent_passing: f64,
}

impl<'a> From<&'a DistributionRow> for ExportRecord<'a> {
    fn from(row: &'a DistributionRow) -> Self {
        ExportRecord {
            sieve: &row.sieve,
            opening_mm: row.opening_mm,
            retained_mass_g: row.retained_mass_g,
            cumulative_mass_g: row.cumulative_mass_g,
            percent_passing: row.percent_passing,
        }
    }
}

/// Write the distribution table as comma-separated values with a header row.
pub fn write_csv<W: Write>(writer: W, rows: &[DistributionRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(ExportRecord::from(row))
            .context("writing CSV record")?;
    }
    csv_writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Export the distribution table to a CSV file.
pub fn export_csv(path: &Path, rows: &[DistributionRow]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, rows)?;
    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}
