use super::error::{Column, InputProblem};
use super::model::{SieveId, SieveRow};

// ---------------------------------------------------------------------------
// RawTable – text cells as produced by a loader
// ---------------------------------------------------------------------------

/// A parsed table of text cells, before any numeric interpretation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names; empty for header-less formats.
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Parse a decimal number written with either `.` or `,` as separator.
///
/// A lone comma (`"4,75"`) is read as a decimal comma. Empty cells yield `None`.
pub fn parse_decimal(cell: &str) -> Option<f64> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    if s.contains(',') && !s.contains('.') && s.matches(',').count() == 1 {
        return s.replace(',', ".").parse().ok();
    }
    s.parse().ok()
}

fn numeric_cell(cells: &[String], row: usize, column: Column) -> Result<f64, InputProblem> {
    let idx = match column {
        Column::Opening => 1,
        Column::RetainedMass => 2,
    };
    let raw = cells[idx].trim();
    if raw.is_empty() {
        return Err(InputProblem::Missing { row, column });
    }
    let value = parse_decimal(raw).ok_or_else(|| InputProblem::NotNumeric {
        row,
        column,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(InputProblem::NonFinite { row, column });
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Positional reinterpretation
// ---------------------------------------------------------------------------

/// Read the first three columns as sieve, opening (mm) and retained mass (g).
///
/// Header names are ignored and any further columns are dropped.
pub fn sieve_rows(table: &RawTable) -> Result<Vec<SieveRow>, InputProblem> {
    if !table.headers.is_empty() && table.headers.len() < 3 {
        return Err(InputProblem::TooFewColumns {
            found: table.headers.len(),
        });
    }
    if table.is_empty() {
        return Err(InputProblem::Empty);
    }

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, cells)| {
            if cells.len() < 3 {
                return Err(InputProblem::ShortRow {
                    row: i,
                    found: cells.len(),
                });
            }
            Ok(SieveRow::new(
                SieveId::from_cell(&cells[0]),
                numeric_cell(cells, i, Column::Opening)?,
                numeric_cell(cells, i, Column::RetainedMass)?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(i) = rows
        .windows(2)
        .position(|pair| pair[1].opening_mm > pair[0].opening_mm)
    {
        log::warn!(
            "Sieve openings are not ordered coarsest to finest (row {} is {} mm after {} mm)",
            i + 1,
            rows[i + 1].opening_mm,
            rows[i].opening_mm
        );
    }

    Ok(rows)
}
