/// Data layer: core types, loading, search, statistics and chart preparation.
///
/// Architecture:
/// ```text
///    CSV bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + detect separator → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  named columns of Number | Text | Missing
///   └──────────┘
///     │      │                 │
///     ▼      ▼                 ▼
///  filter   stats          chart
///  (text)   (numeric      (validate →
///            columns)      prepare series)
/// ```

pub mod chart;
pub mod filter;
pub mod info;
pub mod loader;
pub mod model;
pub mod stats;
