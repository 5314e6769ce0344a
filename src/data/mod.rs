/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site index, payload bounds
///   └───────────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ filter/aggregate  │  selection → pie counts, scatter points
///   └──────────────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
