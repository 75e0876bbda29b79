pub mod lines;
pub mod pricing;
pub mod sections;
pub mod summary;
pub mod tree;

use crate::model::DocumentParseResult;

/// Three-stage pipeline: full text → item section lines → item tree → summary.
pub fn parse_document(filename: &str, text: &str) -> DocumentParseResult {
    let lines = sections::extract_item_section(text);
    let items = tree::assemble(lines);
    let summary = summary::summarize(&items);

    DocumentParseResult {
        filename: filename.to_string(),
        items,
        item_count: summary.item_count,
        hierarchy_depth: summary.hierarchy_depth,
        has_location_grouping: summary.has_location_grouping,
        pricing_patterns: summary.pricing_patterns,
    }
}

// ── Tests ──
