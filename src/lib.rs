//! AF3-Report — batch triage of AlphaFold-3 prediction outputs
//!
//! Scans a directory of AF3 prediction folders, extracts confidence metrics
//! and PAE matrices, renders per-model thumbnail heatmaps, and aggregates
//! everything into a two-sheet workbook (per-model detail table + per-seed
//! statistical summary).
//!
//! # Architecture
//!
//! ```text
//! <root>/
//!   ├── complex_s1/
//!   │     ├── complex_s1_full_data_0.json           (PAE matrix)
//!   │     ├── complex_s1_summary_confidences_0.json (scalar + chain metrics)
//!   │     └── complex_s1_model_0.cif                (optional structure)
//!   └── complex_s2/ ...
//!      │
//!      ▼
//! ┌────┴──────────────────────────────────────────────────────────┐
//! │  ScanPipeline                                                 │
//! │    ├─ 1. Scan immediate subdirectories, pair required files   │
//! │    ├─ 2. Extract metrics + render pae_thumbnail.png per model │
//! │    ├─ 3. Group records by (base model, seed)                  │
//! │    └─ 4. Write workbook (+ optional CSV)                      │
//! └───────────────────────────────────────────────────────────────┘
//!      │
//!      ▼ <root>/<name>_af3_summary.xlsx
//!        ├── "All data"       one row per model, thumbnail embedded
//!        └── "Seed Analysis"  one row per base model, per-seed columns
//!                             + Min/Max/Median/Mean/SD per metric
//! ```
//!
//! # CLI Contract
//!
//! ```bash
//! af3report scan predictions/ [--csv] [-o workbook.xlsx]
//! ```

pub mod aggregate;
pub mod config;
pub mod inputs;
pub mod metrics;
pub mod naming;
pub mod outputs;
pub mod pipeline;
pub mod scan;
pub mod stats;
pub mod thumbnail;
pub mod workbook;

// Re-exports
pub use aggregate::{aggregate, GroupedMetric, SeedAnalysis, SeedMetrics};
pub use config::{OutputFormats, ScanConfig};
pub use inputs::{ConfidenceSummary, FullData};
pub use metrics::{extract_model, MetricValue, ModelRecord, NOT_AVAILABLE};
pub use naming::{parse_model_name, sanitize_file_name};
pub use outputs::OutputPaths;
pub use pipeline::{ScanPipeline, ScanSummary};
pub use scan::{scan_root, ModelFiles};
pub use stats::compute_statistics;

/// Crate version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
