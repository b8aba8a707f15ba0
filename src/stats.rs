//! Descriptive statistics over per-seed metric values
//!
//! Booleans participate as 0/1, so the mean of a boolean metric reads as a
//! rate (e.g. clash rate across seeds). Sentinel values are discarded
//! before computation; an all-sentinel input yields all-sentinel output.

use crate::metrics::MetricValue;

/// Column labels for the five statistics, in output order
pub const STAT_LABELS: [&str; 5] = ["Min", "Max", "Median", "Mean", "SD"];

/// Compute `[min, max, median, mean, sample SD]` over a metric's values.
///
/// Values that are missing are discarded; booleans coerce to 0.0/1.0. With
/// no numeric values left, all five results are the missing sentinel. The
/// standard deviation is the n−1 sample form when n ≥ 2, else 0.
pub fn compute_statistics(values: &[MetricValue]) -> [MetricValue; 5] {
    let mut numeric: Vec<f64> = values.iter().filter_map(MetricValue::as_f64).collect();

    if numeric.is_empty() {
        return [
            MetricValue::Missing,
            MetricValue::Missing,
            MetricValue::Missing,
            MetricValue::Missing,
            MetricValue::Missing,
        ];
    }

    numeric.sort_by(f64::total_cmp);
    let n = numeric.len();

    let min = numeric[0];
    let max = numeric[n - 1];
    let median = if n % 2 == 1 {
        numeric[n / 2]
    } else {
        (numeric[n / 2 - 1] + numeric[n / 2]) / 2.0
    };
    let mean = numeric.iter().sum::<f64>() / n as f64;
    let stdev = if n >= 2 {
        let var = numeric.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };

    [
        MetricValue::Number(min),
        MetricValue::Number(max),
        MetricValue::Number(median),
        MetricValue::Number(mean),
        MetricValue::Number(stdev),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<MetricValue> {
        values.iter().map(|v| MetricValue::Number(*v)).collect()
    }

    fn assert_number(actual: &MetricValue, expected: f64) {
        match actual {
            MetricValue::Number(v) => assert!(
                (v - expected).abs() < 1e-9,
                "expected {expected}, got {v}"
            ),
            other => panic!("expected Number({expected}), got {other:?}"),
        }
    }

    #[test]
    fn test_all_missing_yields_sentinels() {
        let result = compute_statistics(&[MetricValue::Missing, MetricValue::Missing]);
        assert!(result.iter().all(MetricValue::is_missing));
    }

    #[test]
    fn test_simple_sequence() {
        let result = compute_statistics(&numbers(&[1.0, 2.0, 3.0]));
        assert_number(&result[0], 1.0);
        assert_number(&result[1], 3.0);
        assert_number(&result[2], 2.0);
        assert_number(&result[3], 2.0);
        assert_number(&result[4], 1.0);
    }

    #[test]
    fn test_booleans_summarize_as_rates() {
        let result = compute_statistics(&[MetricValue::Bool(true), MetricValue::Bool(false)]);
        assert_number(&result[0], 0.0);
        assert_number(&result[1], 1.0);
        assert_number(&result[2], 0.5);
        assert_number(&result[3], 0.5);
        assert_number(&result[4], std::f64::consts::FRAC_1_SQRT_2);
    }

    #[test]
    fn test_mixed_presence_discards_sentinels() {
        let values = vec![
            MetricValue::Number(0.8),
            MetricValue::Missing,
            MetricValue::Number(0.6),
        ];
        let result = compute_statistics(&values);
        assert_number(&result[0], 0.6);
        assert_number(&result[1], 0.8);
        assert_number(&result[3], 0.7);
    }

    #[test]
    fn test_single_value_has_zero_stdev() {
        let result = compute_statistics(&numbers(&[0.42]));
        assert_number(&result[2], 0.42);
        assert_number(&result[4], 0.0);
    }

    #[test]
    fn test_even_count_median_averages_middle_pair() {
        let result = compute_statistics(&numbers(&[4.0, 1.0, 3.0, 2.0]));
        assert_number(&result[2], 2.5);
    }
}
