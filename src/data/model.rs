use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// SieveId – the first column of a sieve table
// ---------------------------------------------------------------------------

/// Identifier of a sieve as written in the source table.
///
/// Sieves are usually named by their mesh number (`4`, `10`, `200`), but
/// tables also carry labels such as `3/8"` or `Pan`, so both are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum SieveId {
    Number(f64),
    Label(String),
}

impl SieveId {
    /// Interpret a raw cell: numeric text becomes a number, anything else a label.
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        match super::ingest::parse_decimal(trimmed) {
            Some(n) if n.is_finite() => SieveId::Number(n),
            _ => SieveId::Label(trimmed.to_string()),
        }
    }
}

impl fmt::Display for SieveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Mesh numbers are integral; avoid printing "4.0".
            SieveId::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            SieveId::Number(n) => write!(f, "{n}"),
            SieveId::Label(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for SieveId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// SieveRow – one measured sieve
// ---------------------------------------------------------------------------

/// One row of a sieve test, in physical test order (coarsest first).
#[derive(Debug, Clone, PartialEq)]
pub struct SieveRow {
    pub sieve: SieveId,
    /// Nominal opening of the mesh in millimetres.
    pub opening_mm: f64,
    /// Mass caught on this sieve in grams.
    pub retained_mass_g: f64,
}

impl SieveRow {
    pub fn new(sieve: SieveId, opening_mm: f64, retained_mass_g: f64) -> Self {
        Self {
            sieve,
            opening_mm,
            retained_mass_g,
        }
    }
}

// ---------------------------------------------------------------------------
// DistributionRow – a sieve row augmented with derived columns
// ---------------------------------------------------------------------------

/// A [`SieveRow`] plus the cumulative retained mass and percent passing.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub sieve: SieveId,
    pub opening_mm: f64,
    pub retained_mass_g: f64,
    /// Mass retained on this sieve and every coarser one, rounded to 0.01 g.
    pub cumulative_mass_g: f64,
    /// Share of the sample finer than this opening, in percent.
    pub percent_passing: f64,
}

impl DistributionRow {
    pub fn from_sieve(row: &SieveRow, cumulative_mass_g: f64, percent_passing: f64) -> Self {
        Self {
            sieve: row.sieve.clone(),
            opening_mm: row.opening_mm,
            retained_mass_g: row.retained_mass_g,
            cumulative_mass_g,
            percent_passing,
        }
    }
}

/// `(opening_mm, percent_passing)` – one point of the distribution curve.
pub type CurvePoint = (f64, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sieve_id_from_numeric_cell() {
        assert_eq!(SieveId::from_cell(" 10 "), SieveId::Number(10.0));
        assert_eq!(SieveId::from_cell("0,5"), SieveId::Number(0.5));
    }

    #[test]
    fn sieve_id_from_label_cell() {
        assert_eq!(SieveId::from_cell("Pan"), SieveId::Label("Pan".into()));
        assert_eq!(SieveId::from_cell("3/8\""), SieveId::Label("3/8\"".into()));
    }

    #[test]
    fn sieve_id_display_drops_trailing_zero() {
        assert_eq!(SieveId::Number(200.0).to_string(), "200");
        assert_eq!(SieveId::Number(1.5).to_string(), "1.5");
        assert_eq!(SieveId::Label("#4".into()).to_string(), "#4");
    }
}
