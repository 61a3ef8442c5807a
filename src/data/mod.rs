/// Data layer: core types, loading, and thickness computation.
///
/// Architecture:
/// ```text
///  Data/*.csv  (Latin-1, X/Y column pairs)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → Table, clean X/Y pairs
///   └──────────┘
///        │         params: header → SimulationParams
///        ▼
///   ┌───────────┐
///   │ thickness  │  Y > threshold mask → GrowthRow / ThicknessRow
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  status counts, deviating rows, dedup
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod params;
pub mod thickness;
