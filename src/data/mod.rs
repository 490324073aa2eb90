/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  parse + tokenize → AnimeDataset (cached once)
///    └──────────┘
///          │
///          ▼
///    ┌──────────────┐
///    │ AnimeDataset  │  Vec<AnimeRecord>, option vocabularies
///    └──────────────┘
///          │
///          ▼
///    ┌──────────┐      ┌────────────┐
///    │  filter   │ ───▶ │ aggregate  │  FilteredView → chart inputs
///    └──────────┘      └────────────┘
/// ```
///
/// Nothing in this module renders anything: every function takes a dataset
/// or view and returns a value, so the whole layer is testable without a UI.
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod tokens;
