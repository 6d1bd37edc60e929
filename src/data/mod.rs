/// Data layer: raw tables, CSV IO, and manual-input parsing.
///
/// Architecture:
/// ```text
///  uploaded .csv     typed feature line
///        │                  │
///        ▼                  ▼
///   ┌──────────┐      ┌──────────────────┐
///   │  loader   │      │ parse_feature_line│ → Vec<f64>
///   └──────────┘      └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  headers + raw string rows
///   └──────────┘
///        │  + one prediction per row
///        ▼
///   ┌─────────────┐
///   │ ScoredTable  │  display grid / predictions.csv bytes
///   └─────────────┘
/// ```

pub mod loader;
pub mod table;
