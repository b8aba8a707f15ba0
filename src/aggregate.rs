//! Seed grouping: base model → seed label → reduced metric tuple
//!
//! Deterministic ordering throughout (BTreeMap/BTreeSet + stable iteration
//! order) so that the analysis sheet is byte-stable across runs.

use crate::metrics::{MetricValue, ModelRecord};
use crate::naming::parse_model_name;
use std::collections::{BTreeMap, BTreeSet};

/// The four metrics summarized across seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupedMetric {
    Iptm,
    Ptm,
    FractionDisordered,
    HasClash,
}

impl GroupedMetric {
    /// All grouped metrics in fixed column order
    pub const ALL: [GroupedMetric; 4] = [
        GroupedMetric::Iptm,
        GroupedMetric::Ptm,
        GroupedMetric::FractionDisordered,
        GroupedMetric::HasClash,
    ];

    /// Column-header label
    pub fn label(&self) -> &'static str {
        match self {
            GroupedMetric::Iptm => "iPTM",
            GroupedMetric::Ptm => "pTM",
            GroupedMetric::FractionDisordered => "FractionDisordered",
            GroupedMetric::HasClash => "HasClash",
        }
    }
}

/// Reduced per-seed metric tuple kept for the analysis sheet
#[derive(Debug, Clone)]
pub struct SeedMetrics {
    pub iptm: MetricValue,
    pub ptm: MetricValue,
    pub fraction_disordered: MetricValue,
    pub has_clash: MetricValue,
}

impl SeedMetrics {
    pub fn from_record(record: &ModelRecord) -> Self {
        Self {
            iptm: record.iptm.clone(),
            ptm: record.ptm.clone(),
            fraction_disordered: record.fraction_disordered.clone(),
            has_clash: record.has_clash.clone(),
        }
    }

    pub fn metric(&self, metric: GroupedMetric) -> &MetricValue {
        match metric {
            GroupedMetric::Iptm => &self.iptm,
            GroupedMetric::Ptm => &self.ptm,
            GroupedMetric::FractionDisordered => &self.fraction_disordered,
            GroupedMetric::HasClash => &self.has_clash,
        }
    }
}

/// Result of the grouping pass
#[derive(Debug, Clone, Default)]
pub struct SeedAnalysis {
    /// base model → seed label → reduced metrics
    pub groups: BTreeMap<String, BTreeMap<String, SeedMetrics>>,
    /// Union of seed labels across every base model, lexicographic order
    pub seed_labels: BTreeSet<String>,
}

impl SeedAnalysis {
    /// The values of one metric for one base model, one entry per global
    /// seed label. Seeds the base model lacks yield the sentinel, so every
    /// row reports the identical column set.
    pub fn metric_row(&self, base: &str, metric: GroupedMetric) -> Vec<MetricValue> {
        let seeds = self.groups.get(base);
        self.seed_labels
            .iter()
            .map(|label| {
                seeds
                    .and_then(|m| m.get(label))
                    .map(|sm| sm.metric(metric).clone())
                    .unwrap_or(MetricValue::Missing)
            })
            .collect()
    }
}

/// Group records by inferred (base model, seed label) and collect the
/// global seed-label set.
///
/// A duplicate grouping key keeps the later record (records arrive in scan
/// order, so "later" is well-defined); the conflict is surfaced as a
/// warning rather than an error.
pub fn aggregate(records: &[ModelRecord]) -> SeedAnalysis {
    let mut analysis = SeedAnalysis::default();

    for record in records {
        let (base, seed) = parse_model_name(&record.name);
        analysis.seed_labels.insert(seed.clone());

        let seeds = analysis.groups.entry(base.clone()).or_default();
        if seeds
            .insert(seed.clone(), SeedMetrics::from_record(record))
            .is_some()
        {
            log::warn!(
                "  duplicate grouping key ({base}, {seed}) from '{}'; keeping the later record",
                record.name
            );
        }
    }

    analysis
}
