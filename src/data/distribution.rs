//! Cumulative retained mass and percent passing for a sieve test.
//!
//! Every intermediate value is rounded to two decimals exactly where the
//! historical tool rounded it, so results stay numerically identical to
//! previously published tables:
//!
//! * each running cumulative mass is rounded as soon as it is computed;
//! * the passing fraction is rounded *before* it is scaled to percent.
//!
//! The second rule limits percent passing to whole-percent steps, e.g. a
//! true fraction of 0.495 becomes 0.50 and is reported as 50.00 %.

use super::error::{Column, DistributionError, InputProblem};
use super::model::{CurvePoint, DistributionRow, SieveRow};

/// Round to two decimal places, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running cumulative retained mass, rounded at every step.
pub fn cumulative_masses(rows: &[SieveRow]) -> Vec<f64> {
    rows.iter()
        .scan(None, |running: &mut Option<f64>, row| {
            let next = match *running {
                None => round2(row.retained_mass_g),
                Some(prev) => round2(prev + row.retained_mass_g),
            };
            *running = Some(next);
            Some(next)
        })
        .collect()
}

/// Percent of the total mass that passed a sieve with the given cumulative mass.
pub fn percent_passing(total: f64, cumulative: f64) -> f64 {
    let fraction = round2((total - cumulative) / total);
    round2(fraction * 100.0)
}

/// Reject tables the computation is not defined for.
pub fn validate(rows: &[SieveRow]) -> Result<(), InputProblem> {
    if rows.is_empty() {
        return Err(InputProblem::Empty);
    }
    for (i, row) in rows.iter().enumerate() {
        if !row.opening_mm.is_finite() {
            return Err(InputProblem::NonFinite {
                row: i,
                column: Column::Opening,
            });
        }
        if !row.retained_mass_g.is_finite() {
            return Err(InputProblem::NonFinite {
                row: i,
                column: Column::RetainedMass,
            });
        }
        if row.retained_mass_g < 0.0 {
            return Err(InputProblem::NegativeMass {
                row: i,
                mass: row.retained_mass_g,
            });
        }
    }
    Ok(())
}

/// Derive cumulative mass and percent passing for every row, in input order.
pub fn compute_distribution(rows: &[SieveRow]) -> Result<Vec<DistributionRow>, DistributionError> {
    validate(rows)?;

    let cumulative = cumulative_masses(rows);
    let total = match cumulative.last() {
        Some(&total) if total > 0.0 => total,
        _ => return Err(DistributionError::UndefinedDistribution),
    };

    Ok(rows
        .iter()
        .zip(cumulative)
        .map(|(row, cum)| DistributionRow::from_sieve(row, cum, percent_passing(total, cum)))
        .collect())
}

/// `(opening, percent passing)` pairs in input order, for charting.
///
/// The series is not reversed; putting large openings on the left is up to
/// whoever draws it.
pub fn build_curve_series(rows: &[DistributionRow]) -> Vec<CurvePoint> {
    rows.iter()
        .map(|r| (r.opening_mm, r.percent_passing))
        .collect()
}
