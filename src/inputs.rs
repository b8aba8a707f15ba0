//! Input data structures and parsers for AF3 prediction payloads
//!
//! Both payloads are loaded permissively: every field of interest is
//! optional, unknown fields are ignored, and values are carried as-read.
//! Type or schema drift in a single model therefore degrades that model
//! only and never aborts a run.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Full-data payload; only the PAE matrix is of interest here
#[derive(Debug, Clone, Deserialize)]
pub struct FullData {
    /// Predicted aligned error, a square per-residue-pair matrix
    #[serde(default)]
    pub pae: Option<Vec<Vec<f64>>>,
}

impl FullData {
    /// Load from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read full-data file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse full-data file: {}", path.display()))
    }
}

/// Confidence-summary payload: scalar scores plus chain-level nested
/// structures whose shape depends on the predicted complex
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfidenceSummary {
    #[serde(default)]
    pub iptm: Option<Value>,
    #[serde(default)]
    pub ptm: Option<Value>,
    #[serde(default)]
    pub ranking_score: Option<Value>,
    #[serde(default)]
    pub num_recycles: Option<Value>,
    #[serde(default)]
    pub fraction_disordered: Option<Value>,
    #[serde(default)]
    pub has_clash: Option<Value>,
    #[serde(default)]
    pub chain_iptm: Option<Value>,
    #[serde(default)]
    pub chain_pair_iptm: Option<Value>,
    #[serde(default)]
    pub chain_pair_pae_min: Option<Value>,
    #[serde(default)]
    pub chain_ptm: Option<Value>,
}

impl ConfidenceSummary {
    /// Load from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read confidence summary: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse confidence summary: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_full_data_pae_present() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("full_data.json");
        fs::write(&path, r#"{"pae": [[0.5, 1.2], [1.1, 0.4]], "extra": 7}"#).unwrap();

        let full = FullData::load(&path).unwrap();
        let pae = full.pae.unwrap();
        assert_eq!(pae.len(), 2);
        assert_eq!(pae[0][1], 1.2);
    }

    #[test]
    fn test_full_data_pae_absent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("full_data.json");
        fs::write(&path, r#"{"contact_probs": []}"#).unwrap();

        assert!(FullData::load(&path).unwrap().pae.is_none());
    }

    #[test]
    fn test_confidence_partial_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("summary.json");
        fs::write(&path, r#"{"iptm": 0.84, "has_clash": false, "chain_ptm": [0.9, 0.8]}"#)
            .unwrap();

        let summary = ConfidenceSummary::load(&path).unwrap();
        assert!(summary.iptm.is_some());
        assert!(summary.ptm.is_none());
        assert!(summary.has_clash.is_some());
        assert!(summary.chain_ptm.is_some());
        assert!(summary.chain_pair_pae_min.is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("summary.json");
        fs::write(&path, b"{not json").unwrap();

        assert!(ConfidenceSummary::load(&path).is_err());
    }
}
