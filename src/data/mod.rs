/// Data layer: core types, loading, statistics and derived views.
///
/// Architecture:
/// ```text
///   sp500_clean.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CompanyTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ CompanyTable  │  Vec<CompanyRecord>, immutable for the session
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌─────────┐
///   │  filter   │ ───▶ │  stats   │  medians, quantiles, ranges
///   └──────────┘      └─────────┘
///        │
///        ▼
///   TableView (row indices) / sector counts
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
