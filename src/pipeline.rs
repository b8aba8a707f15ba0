//! Sequential scan pipeline: scan → extract → aggregate → emit
//!
//! Strictly single-pass; no step revisits an earlier one. A failure inside
//! one model directory degrades or drops that model only, while an
//! unusable root or an empty scan is fatal. The workbook is assembled
//! fully in memory and written exactly once at the end of the successful
//! path.

use crate::aggregate::aggregate;
use crate::config::ScanConfig;
use crate::metrics::{extract_model, ModelRecord};
use crate::outputs::{write_detail_csv, OutputPaths};
use crate::scan::{scan_root, CONFIDENCE_SUFFIX, FULL_DATA_SUFFIX};
use crate::workbook::write_workbook;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// The scan pipeline; holds the run configuration
#[derive(Debug, Clone)]
pub struct ScanPipeline {
    config: ScanConfig,
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Qualifying directories found by the scanner
    pub n_candidates: usize,
    /// Records that made it into the detail table
    pub n_models: usize,
    /// Candidates dropped during extraction
    pub n_dropped: usize,
    /// Distinct base models in the analysis sheet
    pub n_base_models: usize,
    /// Distinct seed labels across all base models
    pub n_seed_labels: usize,
    /// Workbook location, when the workbook export was requested
    pub workbook_path: Option<PathBuf>,
    /// CSV location, when the CSV export was requested
    pub csv_path: Option<PathBuf>,
    /// Completion timestamp (RFC 3339)
    pub finished_at: String,
}

impl ScanPipeline {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline and return a summary of what was written.
    pub fn run(&self) -> Result<ScanSummary> {
        // Pre-flight: the root must be a readable directory
        let root = self
            .config
            .root
            .canonicalize()
            .with_context(|| format!("Scan root not found: {}", self.config.root.display()))?;
        if !root.is_dir() {
            bail!("Scan root is not a directory: {}", root.display());
        }

        log::info!("[1/4] Scanning {} for model directories...", root.display());
        let candidates = scan_root(&root)?;
        if candidates.is_empty() {
            bail!(
                "No qualifying model directories found under {}\n\
                 A model directory must contain both a *{} and a *{} file.",
                root.display(),
                FULL_DATA_SUFFIX,
                CONFIDENCE_SUFFIX
            );
        }
        log::info!("  {} qualifying model directories", candidates.len());

        log::info!("[2/4] Extracting confidence metrics...");
        let mut records: Vec<ModelRecord> = Vec::with_capacity(candidates.len());
        let mut dropped = 0usize;
        for files in &candidates {
            match extract_model(files, self.config.thumbnail_px) {
                Ok(Some(record)) => {
                    log::debug!("  {} extracted", record.name);
                    records.push(record);
                }
                Ok(None) => dropped += 1,
                Err(e) => {
                    log::error!("  skipping {}: {:#}", files.name, e);
                    dropped += 1;
                }
            }
        }
        log::info!("  {} models extracted, {} dropped", records.len(), dropped);

        log::info!("[3/4] Grouping seeds...");
        let analysis = aggregate(&records);
        log::info!(
            "  {} base models across {} seed labels",
            analysis.groups.len(),
            analysis.seed_labels.len()
        );

        log::info!("[4/4] Writing outputs...");
        let paths = OutputPaths::new(&root);
        let workbook_path = if self.config.output_formats.xlsx {
            let path = self
                .config
                .workbook_path
                .clone()
                .unwrap_or_else(|| paths.workbook());
            write_workbook(&path, &records, &analysis, self.config.thumbnail_px)?;
            log::info!("  ✓ {}", path.display());
            Some(path)
        } else {
            None
        };

        let csv_path = if self.config.output_formats.csv {
            let csv_path = match &self.config.workbook_path {
                Some(p) => p.with_extension("csv"),
                None => paths.detail_csv(),
            };
            write_detail_csv(&csv_path, &records)?;
            log::info!("  ✓ {}", csv_path.display());
            Some(csv_path)
        } else {
            None
        };

        Ok(ScanSummary {
            n_candidates: candidates.len(),
            n_models: records.len(),
            n_dropped: dropped,
            n_base_models: analysis.groups.len(),
            n_seed_labels: analysis.seed_labels.len(),
            workbook_path,
            csv_path,
            finished_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
