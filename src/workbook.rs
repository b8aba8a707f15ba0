//! The workbook report sink: two sheets, assembled in memory, saved once
//!
//! The detail sheet gets one row per model with the thumbnail embedded in
//! its cell; the analysis sheet gets one row per base model with a uniform
//! per-seed column block plus five statistics per grouped metric. Nothing
//! touches the filesystem until the single `save` at the end, so a failed
//! run never leaves a half-written workbook behind.

use crate::aggregate::{GroupedMetric, SeedAnalysis};
use crate::metrics::{MetricValue, ModelRecord, NOT_AVAILABLE};
use crate::outputs::DETAIL_HEADERS;
use crate::stats::{compute_statistics, STAT_LABELS};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Image, Workbook, Worksheet};
use std::path::Path;

/// Detail sheet name
pub const SHEET_ALL_DATA: &str = "All data";

/// Analysis sheet name
pub const SHEET_SEED_ANALYSIS: &str = "Seed Analysis";

/// Fixed detail-sheet column widths, matching `DETAIL_HEADERS`
const DETAIL_WIDTHS: [f64; 13] = [
    30.0, 45.0, 18.0, 14.0, 14.0, 14.0, 14.0, 16.0, 14.0, 32.0, 32.0, 32.0, 32.0,
];

/// Write the complete workbook to `path`.
///
/// The analysis sheet is added only when at least one grouped record
/// exists. `thumbnail_px` sizes the detail rows to fit the embedded
/// images.
pub fn write_workbook(
    path: &Path,
    records: &[ModelRecord],
    analysis: &SeedAnalysis,
    thumbnail_px: u32,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    write_detail_sheet(
        workbook.add_worksheet(),
        records,
        &header_format,
        thumbnail_px,
    )?;

    if !analysis.groups.is_empty() {
        write_analysis_sheet(workbook.add_worksheet(), analysis, &header_format)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write workbook: {}", path.display()))?;
    Ok(())
}

fn write_detail_sheet(
    sheet: &mut Worksheet,
    records: &[ModelRecord],
    header_format: &Format,
    thumbnail_px: u32,
) -> Result<()> {
    sheet.set_name(SHEET_ALL_DATA)?;

    for (col, header) in DETAIL_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, header_format)?;
        sheet.set_column_width(col as u16, DETAIL_WIDTHS[col])?;
    }

    // 1 px = 0.75 pt at the default 96 dpi
    let row_height = f64::from(thumbnail_px) * 0.75;

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, record.name.as_str())?;

        match &record.structure_file {
            Some(p) => sheet.write_string(row, 1, p.display().to_string())?,
            None => sheet.write_string(row, 1, NOT_AVAILABLE)?,
        };

        match record.thumbnail.as_ref().map(Image::new) {
            Some(Ok(image)) => {
                sheet.set_row_height(row, row_height)?;
                sheet.insert_image(row, 2, &image)?;
            }
            Some(Err(e)) => {
                log::warn!("  {}: failed to embed thumbnail: {}", record.name, e);
                sheet.write_string(row, 2, NOT_AVAILABLE)?;
            }
            None => {
                sheet.write_string(row, 2, NOT_AVAILABLE)?;
            }
        }

        write_metric(sheet, row, 3, &record.iptm)?;
        write_metric(sheet, row, 4, &record.ptm)?;
        write_metric(sheet, row, 5, &record.ranking_score)?;
        write_metric(sheet, row, 6, &record.num_recycles)?;
        write_metric(sheet, row, 7, &record.fraction_disordered)?;
        write_metric(sheet, row, 8, &record.has_clash)?;

        sheet.write_string(row, 9, ModelRecord::nested_text(&record.chain_iptm))?;
        sheet.write_string(row, 10, ModelRecord::nested_text(&record.chain_pair_iptm))?;
        sheet.write_string(row, 11, ModelRecord::nested_text(&record.chain_pair_pae_min))?;
        sheet.write_string(row, 12, ModelRecord::nested_text(&record.chain_ptm))?;
    }

    Ok(())
}

fn write_analysis_sheet(
    sheet: &mut Worksheet,
    analysis: &SeedAnalysis,
    header_format: &Format,
) -> Result<()> {
    sheet.set_name(SHEET_SEED_ANALYSIS)?;

    sheet.write_string_with_format(0, 0, "Base Model", header_format)?;
    sheet.set_column_width(0, 28.0)?;

    // Header: per grouped metric, one column per global seed label followed
    // by the five statistic columns
    let mut col = 1u16;
    for metric in GroupedMetric::ALL {
        for seed in &analysis.seed_labels {
            let header = format!("{} {}", metric.label(), seed);
            sheet.write_string_with_format(0, col, header, header_format)?;
            sheet.set_column_width(col, 14.0)?;
            col += 1;
        }
        for stat in STAT_LABELS {
            let header = format!("{} {}", metric.label(), stat);
            sheet.write_string_with_format(0, col, header, header_format)?;
            sheet.set_column_width(col, 14.0)?;
            col += 1;
        }
    }

    for (idx, base) in analysis.groups.keys().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, base.as_str())?;

        let mut col = 1u16;
        for metric in GroupedMetric::ALL {
            let values = analysis.metric_row(base, metric);
            for value in &values {
                write_metric(sheet, row, col, value)?;
                col += 1;
            }
            for stat in compute_statistics(&values) {
                write_metric(sheet, row, col, &stat)?;
                col += 1;
            }
        }
    }

    Ok(())
}

/// Write one metric cell, keeping its read type: numbers as numbers,
/// booleans as booleans, the sentinel as text
fn write_metric(sheet: &mut Worksheet, row: u32, col: u16, value: &MetricValue) -> Result<()> {
    match value {
        MetricValue::Number(v) => sheet.write_number(row, col, *v)?,
        MetricValue::Bool(b) => sheet.write_boolean(row, col, *b)?,
        MetricValue::Missing => sheet.write_string(row, col, NOT_AVAILABLE)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::thumbnail;
    use tempfile::TempDir;

    fn record(name: &str, iptm: f64, thumbnail: Option<std::path::PathBuf>) -> ModelRecord {
        ModelRecord {
            name: name.to_string(),
            structure_file: None,
            thumbnail,
            iptm: MetricValue::Number(iptm),
            ptm: MetricValue::Number(0.9),
            ranking_score: MetricValue::Missing,
            num_recycles: MetricValue::Number(10.0),
            fraction_disordered: MetricValue::Number(0.01),
            has_clash: MetricValue::Bool(false),
            chain_iptm: Some("[0.8]".to_string()),
            chain_pair_iptm: None,
            chain_pair_pae_min: None,
            chain_ptm: None,
        }
    }

    #[test]
    fn test_workbook_with_both_sheets() {
        let tmp = TempDir::new().unwrap();
        let thumb = tmp.path().join(thumbnail::THUMBNAIL_FILE);
        thumbnail::render_pae_thumbnail(&[vec![0.5, 2.0], vec![2.1, 0.4]], &thumb, 32).unwrap();

        let records = vec![
            record("A_s1", 0.8, Some(thumb)),
            record("A_s2", 0.6, None),
        ];
        let analysis = aggregate(&records);

        let path = tmp.path().join("summary.xlsx");
        write_workbook(&path, &records, &analysis, 32).unwrap();

        assert!(path.exists());
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_workbook_with_no_records() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.xlsx");

        write_workbook(&path, &[], &aggregate(&[]), 32).unwrap();
        assert!(path.exists());
    }
}
