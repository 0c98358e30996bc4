use std::fmt;

use thiserror::Error;

/// Numeric columns of a sieve table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Opening,
    RetainedMass,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::Opening => "opening (mm)",
            Column::RetainedMass => "retained mass (g)",
        };
        f.write_str(name)
    }
}

/// What exactly is wrong with an input table. Row indices are 0-based data rows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputProblem {
    #[error("the sieve table has no rows")]
    Empty,

    #[error("expected at least 3 columns (sieve, opening, retained mass), found {found}")]
    TooFewColumns { found: usize },

    #[error("row {row}: expected at least 3 cells, found {found}")]
    ShortRow { row: usize, found: usize },

    #[error("row {row}: {column} is missing")]
    Missing { row: usize, column: Column },

    #[error("row {row}: {column} value '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: Column,
        value: String,
    },

    #[error("row {row}: {column} must be a finite number")]
    NonFinite { row: usize, column: Column },

    #[error("row {row}: retained mass {mass} g is negative")]
    NegativeMass { row: usize, mass: f64 },
}

/// Failure of a distribution computation. Always scoped to a single table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputProblem),

    #[error("total retained mass is zero, percent passing is undefined")]
    UndefinedDistribution,
}
