/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (NaN for malformed stats)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, category indices; read-only
///   └──────────┘
///        │
///        ▼
///   bar chart · scatter (brush → Selection) · parallel coordinates
/// ```

pub mod loader;
pub mod model;
