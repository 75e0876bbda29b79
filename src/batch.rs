use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ParseError;
use crate::ingest::{load_record, record_stem};
use crate::model::DocumentParseResult;
use crate::parser::parse_document;

const SUMMARY_FILE: &str = "_parse_summary.json";

/// One line of the batch report.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub timestamp: String,
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
    pub pages: u64,
    pub results: Vec<FileResult>,
}

struct Parsed {
    result: DocumentParseResult,
    pages: u32,
}

/// Parse every record, writing one `<stem>_items.json` per success and a
/// `_parse_summary.json` at the end. A record that cannot be read or written
/// is reported and skipped; only failing to create the output directory or
/// the summary aborts the run.
pub fn run_batch(paths: &[PathBuf], output_dir: &Path, chunk_size: usize) -> Result<BatchSummary> {
    fs::create_dir_all(output_dir).map_err(|source| ParseError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut results = Vec::with_capacity(paths.len());
    let mut pages = 0u64;

    for chunk in paths.chunks(chunk_size.max(1)) {
        let outcomes: Vec<_> = chunk
            .par_iter()
            .map(|path| (path, process_one(path, output_dir)))
            .collect();

        for (path, outcome) in outcomes {
            let file = path.display().to_string();
            match outcome {
                Ok(parsed) => {
                    pages += u64::from(parsed.pages);
                    results.push(FileResult {
                        file,
                        items: Some(parsed.result.item_count),
                        hierarchy_depth: Some(parsed.result.hierarchy_depth),
                        error: None,
                    });
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", file, e);
                    results.push(FileResult {
                        file,
                        items: None,
                        hierarchy_depth: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();

    let errors = results.iter().filter(|r| r.error.is_some()).count();
    let summary = BatchSummary {
        timestamp: Utc::now().to_rfc3339(),
        total: results.len(),
        ok: results.len() - errors,
        errors,
        pages,
        results,
    };

    let summary_path = output_dir.join(SUMMARY_FILE);
    write_json(&summary_path, &summary)?;
    info!(
        "Parsed {} documents ({} ok, {} errors)",
        summary.total, summary.ok, summary.errors
    );

    Ok(summary)
}

fn process_one(path: &Path, output_dir: &Path) -> Result<Parsed, ParseError> {
    let record = load_record(path)?;
    let result = parse_document(&record.filename, &record.extracted_text);
    let out = output_dir.join(format!("{}_items.json", record_stem(path)));
    write_json(&out, &result)?;
    Ok(Parsed {
        result,
        pages: record.page_count,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ParseError> {
    let body = serde_json::to_string_pretty(value).map_err(|source| ParseError::Record {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, body).map_err(|source| ParseError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ──
