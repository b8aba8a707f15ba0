//! Directory scanner: discover model directories and pair their input files
//!
//! A model directory qualifies when its immediate children contain both a
//! full-data JSON (PAE matrix) and a confidence-summary JSON. The structure
//! file is derived from the full-data filename, never searched for, and its
//! absence does not disqualify the model.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Filename suffix of the PAE/full-data payload
pub const FULL_DATA_SUFFIX: &str = "_full_data_0.json";

/// Filename suffix of the confidence-summary payload
pub const CONFIDENCE_SUFFIX: &str = "_summary_confidences_0.json";

/// Filename suffix of the (optional) structure file, derived from the
/// full-data filename by substring replacement
pub const STRUCTURE_SUFFIX: &str = "_model_0.cif";

/// One discovered model directory with its paired input files
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// The model directory itself
    pub dir: PathBuf,
    /// Directory name, unique key within a run
    pub name: String,
    /// Full-data JSON holding the PAE matrix
    pub full_data: PathBuf,
    /// Confidence-summary JSON holding the scalar and chain metrics
    pub confidence: PathBuf,
    /// Structure file, if present next to the full-data file
    pub structure: Option<PathBuf>,
}

/// Scan the immediate subdirectories of `root` and return the qualifying
/// model directories in lexicographic name order.
///
/// Hidden entries (leading `.`) and non-directories are skipped. A directory
/// missing either required file is skipped with a debug note; a directory
/// whose listing fails is skipped with an error note. Neither aborts the
/// scan.
pub fn scan_root(root: &Path) -> Result<Vec<ModelFiles>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read scan root: {}", root.display()))?;

    let mut dirs: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", root.display()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !path.is_dir() {
            continue;
        }
        dirs.push(path);
    }
    dirs.sort();

    let mut models = Vec::new();
    for dir in dirs {
        match pair_model_files(&dir) {
            Ok(Some(files)) => models.push(files),
            Ok(None) => {
                log::debug!(
                    "  skipping {} (missing full-data or confidence file)",
                    dir.display()
                );
            }
            Err(e) => {
                log::error!("  skipping {}: {:#}", dir.display(), e);
            }
        }
    }

    Ok(models)
}

/// Inspect one candidate directory's immediate children (no recursion) and
/// pair the expected files. Returns `None` when the directory does not
/// qualify.
fn pair_model_files(dir: &Path) -> Result<Option<ModelFiles>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read model directory: {}", dir.display()))?;

    let mut children: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        children.push(entry.file_name().to_string_lossy().into_owned());
    }
    // Sorted so multiple suffix matches resolve deterministically
    children.sort();

    let full_data_name = children.iter().find(|n| n.ends_with(FULL_DATA_SUFFIX));
    let confidence_name = children.iter().find(|n| n.ends_with(CONFIDENCE_SUFFIX));

    let (full_data_name, confidence_name) = match (full_data_name, confidence_name) {
        (Some(f), Some(c)) => (f, c),
        _ => return Ok(None),
    };

    // Derived, never searched for independently
    let structure_name = full_data_name.replace(FULL_DATA_SUFFIX, STRUCTURE_SUFFIX);
    let structure_path = dir.join(&structure_name);
    let structure = structure_path.exists().then_some(structure_path);

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(ModelFiles {
        dir: dir.to_path_buf(),
        name,
        full_data: dir.join(full_data_name),
        confidence: dir.join(confidence_name),
        structure,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"{}").unwrap();
    }

    fn make_model_dir(root: &Path, name: &str, with_confidence: bool, with_structure: bool) {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        touch(&dir.join(format!("{name}{FULL_DATA_SUFFIX}")));
        if with_confidence {
            touch(&dir.join(format!("{name}{CONFIDENCE_SUFFIX}")));
        }
        if with_structure {
            touch(&dir.join(format!("{name}{STRUCTURE_SUFFIX}")));
        }
    }

    #[test]
    fn test_qualifying_pair_required() {
        let tmp = TempDir::new().unwrap();
        make_model_dir(tmp.path(), "complete", true, true);
        make_model_dir(tmp.path(), "no_confidence", false, false);

        let models = scan_root(tmp.path()).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "complete");
    }

    #[test]
    fn test_structure_absence_does_not_disqualify() {
        let tmp = TempDir::new().unwrap();
        make_model_dir(tmp.path(), "no_cif", true, false);

        let models = scan_root(tmp.path()).unwrap();
        assert_eq!(models.len(), 1);
        assert!(models[0].structure.is_none());
    }

    #[test]
    fn test_structure_path_derived_from_full_data_name() {
        let tmp = TempDir::new().unwrap();
        make_model_dir(tmp.path(), "abc", true, true);

        let models = scan_root(tmp.path()).unwrap();
        let structure = models[0].structure.as_ref().unwrap();
        assert!(structure.ends_with(format!("abc{STRUCTURE_SUFFIX}")));
    }

    #[test]
    fn test_hidden_and_plain_file_entries_skipped() {
        let tmp = TempDir::new().unwrap();
        make_model_dir(tmp.path(), ".hidden", true, false);
        make_model_dir(tmp.path(), "visible", true, false);
        touch(&tmp.path().join("stray_file.json"));

        let models = scan_root(tmp.path()).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "visible");
    }

    #[test]
    fn test_lexicographic_order() {
        let tmp = TempDir::new().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            make_model_dir(tmp.path(), name, true, false);
        }

        let names: Vec<String> = scan_root(tmp.path())
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_empty_root_yields_no_models() {
        let tmp = TempDir::new().unwrap();
        assert!(scan_root(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("does_not_exist");
        assert!(scan_root(&gone).is_err());
    }
}
