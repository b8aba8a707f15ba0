//! Configuration structures for the scan pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root directory containing one subdirectory per predicted model
    pub root: PathBuf,

    /// Explicit workbook path; when unset the workbook is named from the
    /// sanitized root directory name and written into the root itself
    pub workbook_path: Option<PathBuf>,

    /// Output format options
    pub output_formats: OutputFormats,

    /// Thumbnail edge length in pixels (thumbnails are square)
    pub thumbnail_px: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            workbook_path: None,
            output_formats: OutputFormats::default(),
            thumbnail_px: 128, // small enough to embed one per detail row
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFormats {
    /// Two-sheet workbook (detail table + seed analysis)
    pub xlsx: bool,
    /// Detail table as CSV next to the workbook (no images)
    pub csv: bool,
}

impl Default for OutputFormats {
    fn default() -> Self {
        Self {
            xlsx: true,
            csv: false,
        }
    }
}
