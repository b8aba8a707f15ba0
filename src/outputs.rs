//! Output path contract and the CSV detail export

use crate::metrics::{ModelRecord, NOT_AVAILABLE};
use crate::naming::sanitize_file_name;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Column headers of the detail table, in fixed order
pub const DETAIL_HEADERS: [&str; 13] = [
    "Model",
    "Structure File",
    "PAE Thumbnail",
    "iptm",
    "ptm",
    "ranking_score",
    "num_recycles",
    "fraction_disordered",
    "has_clash",
    "chain_iptm",
    "chain_pair_iptm",
    "chain_pair_pae_min",
    "chain_ptm",
];

/// Output locations derived from the scan root: the workbook (and optional
/// CSV sibling) live in the root and are named from its sanitized name.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    root: PathBuf,
    stem: String,
}

impl OutputPaths {
    pub fn new(root: &Path) -> Self {
        let raw = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            root: root.to_path_buf(),
            stem: sanitize_file_name(&raw),
        }
    }

    pub fn workbook(&self) -> PathBuf {
        self.root.join(format!("{}_af3_summary.xlsx", self.stem))
    }

    pub fn detail_csv(&self) -> PathBuf {
        self.root.join(format!("{}_af3_summary.csv", self.stem))
    }
}

/// Write the detail table as CSV (no images; the thumbnail column carries
/// the file path instead).
pub fn write_detail_csv(path: &Path, records: &[ModelRecord]) -> Result<()> {
    let mut csv = String::new();
    csv.push_str(&DETAIL_HEADERS.join(","));
    csv.push('\n');

    for record in records {
        let structure = record
            .structure_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let thumbnail = record
            .thumbnail
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let fields = [
            record.name.clone(),
            structure,
            thumbnail,
            record.iptm.to_string(),
            record.ptm.to_string(),
            record.ranking_score.to_string(),
            record.num_recycles.to_string(),
            record.fraction_disordered.to_string(),
            record.has_clash.to_string(),
            ModelRecord::nested_text(&record.chain_iptm).to_string(),
            ModelRecord::nested_text(&record.chain_pair_iptm).to_string(),
            ModelRecord::nested_text(&record.chain_pair_pae_min).to_string(),
            ModelRecord::nested_text(&record.chain_ptm).to_string(),
        ];

        let escaped: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        csv.push_str(&escaped.join(","));
        csv.push('\n');
    }

    std::fs::write(path, &csv)
        .with_context(|| format!("Failed to write detail CSV: {}", path.display()))?;
    Ok(())
}

/// Quote a CSV field when it contains separators or quotes (nested chain
/// metrics are JSON text and always do).
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
