use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::fields::DetectedFields;

const RECORD_SUFFIX: &str = "_extracted.json";

/// One document as handed over by the text-extraction step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "unknown_filename")]
    pub filename: String,
    #[serde(default)]
    pub extracted_text: String,
    #[serde(default = "one_page")]
    pub page_count: u32,
    #[serde(default)]
    pub detected_fields: Option<DetectedFields>,
}

fn unknown_filename() -> String {
    "unknown".to_string()
}

fn one_page() -> u32 {
    1
}

impl ExtractedDocument {
    pub fn from_text(filename: &str, text: &str) -> Self {
        ExtractedDocument {
            id: None,
            filename: filename.to_string(),
            extracted_text: text.to_string(),
            page_count: 1,
            detected_fields: None,
        }
    }
}

/// Load a JSON extraction record, or wrap a plain-text file as one.
pub fn load_record(path: &Path) -> Result<ExtractedDocument, ParseError> {
    let raw = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(unknown_filename);
        return Ok(ExtractedDocument::from_text(&name, &raw));
    }

    serde_json::from_str(&raw).map_err(|source| ParseError::Record {
        path: path.to_path_buf(),
        source,
    })
}

/// List `*_extracted.json` records in `dir`, skipping `_`-prefixed summary
/// files, sorted by path.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let entries = fs::read_dir(dir).map_err(|source| ParseError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(RECORD_SUFFIX) && !n.starts_with('_'))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Output stem for a record: the source file name without its extension or
/// the `_extracted` suffix.
pub fn record_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Some(stem) = name.strip_suffix(RECORD_SUFFIX) {
        return stem.to_string();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(name)
}

// ── Tests ──
