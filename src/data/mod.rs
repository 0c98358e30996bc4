/// Data layer: sieve tables, the distribution calculator, loading and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (text cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  ingest   │  first three columns → Vec<SieveRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ distribution │  cumulative mass, percent passing, curve series
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  batch    │  one SieveTest per file, in parallel, failures isolated
///   └──────────┘
/// ```

pub mod batch;
pub mod distribution;
pub mod error;
pub mod export;
pub mod ingest;
pub mod loader;
pub mod model;
