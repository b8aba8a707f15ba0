//! Metric extraction: one qualifying directory in, one `ModelRecord` out
//!
//! Scalar fields pass through as-read (number or boolean); anything absent
//! or of an unexpected shape becomes the `N/A` sentinel. Chain-level nested
//! structures are kept as compact JSON text for display. A missing PAE
//! matrix drops the model entirely; a failed thumbnail render only degrades
//! it.

use crate::inputs::{ConfidenceSummary, FullData};
use crate::scan::ModelFiles;
use crate::thumbnail;
use anyhow::Result;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Sentinel shown for any metric that could not be read
pub const NOT_AVAILABLE: &str = "N/A";

/// A confidence metric as read from the payload: numeric, boolean, or absent
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Bool(bool),
    Missing,
}

impl MetricValue {
    /// Build from an optional JSON value, passing numbers and booleans
    /// through unchanged. Any other shape counts as missing.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) => MetricValue::Number(v),
                None => MetricValue::Missing,
            },
            Some(Value::Bool(b)) => MetricValue::Bool(*b),
            _ => MetricValue::Missing,
        }
    }

    /// Numeric view used by the statistics pass: booleans coerce to 0/1,
    /// the sentinel is discarded.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(v) => Some(*v),
            MetricValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            MetricValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, MetricValue::Missing)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(v) => write!(f, "{v}"),
            MetricValue::Bool(b) => write!(f, "{b}"),
            MetricValue::Missing => write!(f, "{NOT_AVAILABLE}"),
        }
    }
}

/// One discovered, fully-processed model directory
#[derive(Debug, Clone)]
pub struct ModelRecord {
    /// Directory name, unique key within a run
    pub name: String,
    /// Structure file next to the full-data file, if present
    pub structure_file: Option<PathBuf>,
    /// Rendered PAE thumbnail, if the render succeeded
    pub thumbnail: Option<PathBuf>,

    // Scalar metrics
    pub iptm: MetricValue,
    pub ptm: MetricValue,
    pub ranking_score: MetricValue,
    pub num_recycles: MetricValue,
    pub fraction_disordered: MetricValue,
    pub has_clash: MetricValue,

    // Chain-level metrics, serialized as compact JSON text for display
    pub chain_iptm: Option<String>,
    pub chain_pair_iptm: Option<String>,
    pub chain_pair_pae_min: Option<String>,
    pub chain_ptm: Option<String>,
}

impl ModelRecord {
    /// Display text for a nested chain metric column
    pub fn nested_text(field: &Option<String>) -> &str {
        field.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Serialize a nested chain metric to compact JSON text
fn nested_to_text(value: Option<&Value>) -> Option<String> {
    value.and_then(|v| serde_json::to_string(v).ok())
}

/// Process one qualifying directory into a `ModelRecord`.
///
/// Returns `Ok(None)` when the full-data payload carries no `pae` matrix;
/// such models are dropped from the run entirely. All other degradations
/// (failed thumbnail, missing confidence fields) still produce a record.
pub fn extract_model(files: &ModelFiles, thumbnail_px: u32) -> Result<Option<ModelRecord>> {
    let full_data = FullData::load(&files.full_data)?;

    let pae = match full_data.pae {
        Some(matrix) => matrix,
        None => {
            log::warn!(
                "  {}: full-data payload has no 'pae' matrix, dropping model",
                files.name
            );
            return Ok(None);
        }
    };

    // Overwrites any thumbnail from a previous run
    let thumbnail_path = files.dir.join(thumbnail::THUMBNAIL_FILE);
    let thumbnail = match thumbnail::render_pae_thumbnail(&pae, &thumbnail_path, thumbnail_px) {
        Ok(()) => Some(thumbnail_path),
        Err(e) => {
            log::warn!("  {}: thumbnail render failed: {:#}", files.name, e);
            None
        }
    };

    let summary = ConfidenceSummary::load(&files.confidence)?;

    Ok(Some(ModelRecord {
        name: files.name.clone(),
        structure_file: files.structure.clone(),
        thumbnail,
        iptm: MetricValue::from_json(summary.iptm.as_ref()),
        ptm: MetricValue::from_json(summary.ptm.as_ref()),
        ranking_score: MetricValue::from_json(summary.ranking_score.as_ref()),
        num_recycles: MetricValue::from_json(summary.num_recycles.as_ref()),
        fraction_disordered: MetricValue::from_json(summary.fraction_disordered.as_ref()),
        has_clash: MetricValue::from_json(summary.has_clash.as_ref()),
        chain_iptm: nested_to_text(summary.chain_iptm.as_ref()),
        chain_pair_iptm: nested_to_text(summary.chain_pair_iptm.as_ref()),
        chain_pair_pae_min: nested_to_text(summary.chain_pair_pae_min.as_ref()),
        chain_ptm: nested_to_text(summary.chain_ptm.as_ref()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_model_dir(root: &Path, name: &str, full_data: &str, confidence: &str) {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        fs::write(
            dir.join(format!("{name}{}", scan::FULL_DATA_SUFFIX)),
            full_data,
        )
        .unwrap();
        fs::write(
            dir.join(format!("{name}{}", scan::CONFIDENCE_SUFFIX)),
            confidence,
        )
        .unwrap();
    }

    fn scan_one(root: &Path) -> crate::scan::ModelFiles {
        let mut models = scan::scan_root(root).unwrap();
        assert_eq!(models.len(), 1);
        models.remove(0)
    }

    #[test]
    fn test_extract_complete_record() {
        let tmp = TempDir::new().unwrap();
        write_model_dir(
            tmp.path(),
            "complex_s1",
            r#"{"pae": [[0.5, 3.0], [3.1, 0.6]]}"#,
            r#"{"iptm": 0.84, "ptm": 0.9, "ranking_score": 0.88, "num_recycles": 10.0,
                "fraction_disordered": 0.02, "has_clash": false,
                "chain_iptm": [0.8, 0.7], "chain_ptm": [0.9]}"#,
        );

        let record = extract_model(&scan_one(tmp.path()), 32).unwrap().unwrap();
        assert_eq!(record.name, "complex_s1");
        assert_eq!(record.iptm, MetricValue::Number(0.84));
        assert_eq!(record.has_clash, MetricValue::Bool(false));
        assert_eq!(record.chain_iptm.as_deref(), Some("[0.8,0.7]"));
        assert!(record.chain_pair_iptm.is_none());
        assert!(record.thumbnail.is_some());
        assert!(record.thumbnail.unwrap().exists());
    }

    #[test]
    fn test_missing_pae_drops_model() {
        let tmp = TempDir::new().unwrap();
        write_model_dir(
            tmp.path(),
            "no_pae",
            r#"{"contact_probs": []}"#,
            r#"{"iptm": 0.5}"#,
        );

        assert!(extract_model(&scan_one(tmp.path()), 32).unwrap().is_none());
    }

    #[test]
    fn test_missing_fields_become_sentinels() {
        let tmp = TempDir::new().unwrap();
        write_model_dir(tmp.path(), "sparse", r#"{"pae": [[1.0]]}"#, r#"{}"#);

        let record = extract_model(&scan_one(tmp.path()), 32).unwrap().unwrap();
        assert!(record.iptm.is_missing());
        assert!(record.has_clash.is_missing());
        assert_eq!(ModelRecord::nested_text(&record.chain_iptm), NOT_AVAILABLE);
    }

    #[test]
    fn test_empty_pae_degrades_thumbnail_only() {
        let tmp = TempDir::new().unwrap();
        write_model_dir(tmp.path(), "empty_pae", r#"{"pae": []}"#, r#"{"iptm": 0.7}"#);

        let record = extract_model(&scan_one(tmp.path()), 32).unwrap().unwrap();
        assert!(record.thumbnail.is_none());
        assert_eq!(record.iptm, MetricValue::Number(0.7));
    }

    #[test]
    fn test_malformed_confidence_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write_model_dir(tmp.path(), "broken", r#"{"pae": [[1.0]]}"#, "{not json");

        assert!(extract_model(&scan_one(tmp.path()), 32).is_err());
    }

    #[test]
    fn test_unexpected_scalar_shape_counts_as_missing() {
        let tmp = TempDir::new().unwrap();
        write_model_dir(
            tmp.path(),
            "odd_types",
            r#"{"pae": [[1.0]]}"#,
            r#"{"iptm": "high", "ptm": null}"#,
        );

        let record = extract_model(&scan_one(tmp.path()), 32).unwrap().unwrap();
        assert!(record.iptm.is_missing());
        assert!(record.ptm.is_missing());
    }
}
