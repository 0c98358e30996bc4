use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use super::distribution::{build_curve_series, compute_distribution};
use super::error::DistributionError;
use super::ingest::{RawTable, sieve_rows};
use super::loader::load_file;
use super::model::{CurvePoint, DistributionRow};

/// The derived table and curve of one successful sieve test.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub rows: Vec<DistributionRow>,
    pub curve: Vec<CurvePoint>,
}

/// One loaded file together with its result or a message to show instead.
#[derive(Debug, Clone)]
pub struct SieveTest {
    /// File name shown in titles and legends.
    pub name: String,
    pub path: PathBuf,
    pub outcome: Result<Analysis, String>,
}

impl SieveTest {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.outcome.as_ref().ok()
    }
}

/// Interpret a loaded table and derive its distribution.
pub fn analyze_table(table: &RawTable) -> Result<Analysis, DistributionError> {
    let rows = compute_distribution(&sieve_rows(table)?)?;
    let curve = build_curve_series(&rows);
    Ok(Analysis { rows, curve })
}

/// Load and analyse a single file. Failures are captured, never propagated.
pub fn analyze_file(path: &Path) -> SieveTest {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let outcome = load_file(path)
        .with_context(|| format!("loading {name}"))
        .and_then(|table| analyze_table(&table).with_context(|| format!("analysing {name}")));

    match &outcome {
        Ok(analysis) => log::info!("Analysed {name}: {} sieves", analysis.rows.len()),
        Err(e) => log::error!("Failed to analyse {name}: {e:#}"),
    }

    SieveTest {
        name,
        path: path.to_path_buf(),
        outcome: outcome.map_err(|e| format!("{e:#}")),
    }
}

/// Analyse many files in parallel, keeping their order.
pub fn analyze_files(paths: &[PathBuf]) -> Vec<SieveTest> {
    paths.par_iter().map(|p| analyze_file(p)).collect()
}
