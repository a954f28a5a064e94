/// Data layer: core types, loading, cleaning and writing.
///
/// Architecture:
/// ```text
///   raw .csv
///      │
///      ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (untyped FieldValues)
///   └──────────┘
///      │                         │
///      ▼                         ▼
///   ┌──────────┐           signal_column → Vec<f64> → spectrum
///   │  clean    │  coerce + drop incomplete → Vec<CleanedRecord>
///   └──────────┘                                        │
///      │                                                ▼
///      ▼                                           ┌──────────┐
///   ┌──────────┐                                   │  filter   │  [fmin, fmax] clip
///   │  writer   │  time,value CSV                  └──────────┘
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;
