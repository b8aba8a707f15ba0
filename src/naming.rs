//! Model-name parsing and output-filename sanitization
//!
//! AF3 batch runs encode the sampling seed as a `_s<digits>` suffix on the
//! prediction directory name (`complex_s3` = base `complex`, seed `s3`).
//! Names without a valid suffix are their own base model with seed `s0`.

/// Maximum length of a sanitized workbook stem
const MAX_STEM_LEN: usize = 120;

/// Fallback stem when sanitization leaves nothing usable
const FALLBACK_STEM: &str = "af3_summary";

/// Split a model directory name into (base model, seed label).
///
/// Splits on the LAST `_s` occurrence; the trailing part must be non-empty
/// and all ASCII digits for the split to count. `complex_s2_s10` therefore
/// yields base `complex_s2`, seed `s10`. Total function, no failure mode.
pub fn parse_model_name(name: &str) -> (String, String) {
    if let Some(idx) = name.rfind("_s") {
        let head = &name[..idx];
        let tail = &name[idx + 2..];
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
            return (head.to_string(), format!("s{tail}"));
        }
    }
    (name.to_string(), "s0".to_string())
}

/// Sanitize a directory name into a filename stem safe on common filesystems.
///
/// Strips characters illegal on Windows/NTFS (the strictest common target),
/// drops control characters, trims trailing dots and spaces, and caps the
/// length. An empty result falls back to a fixed stem.
pub fn sanitize_file_name(raw: &str) -> String {
    let mut stem: String = raw
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .filter(|c| !c.is_control())
        .collect();

    while stem.ends_with('.') || stem.ends_with(' ') {
        stem.pop();
    }

    if stem.chars().count() > MAX_STEM_LEN {
        stem = stem.chars().take(MAX_STEM_LEN).collect();
    }

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}
