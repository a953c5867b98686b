/// Data layer: core types, loading, and the chart-ready transforms.
///
/// Architecture:
/// ```text
///  .xlsx / .csv        cow2iso.csv
///        │                  │
///        └────────┬─────────┘
///                 ▼
///           ┌──────────┐
///           │  loader   │  coerce keys, left join → Dataset
///           └──────────┘
///                 │
///                 ▼
///           ┌──────────┐
///           │ Dataset   │  Vec<CountryYear>, immutable after load
///           └──────────┘
///                 │
///                 ▼
///           ┌──────────┐
///           │ aggregate │  year filter, groupby counts → chart series
///           └──────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
