use itertools::Itertools;

use crate::model::{Item, PricingFormat};

pub const LOCATION_KEYWORDS: &[&str] = &["floor", "room", "dept", "office", "area", "section"];

/// Aggregate metadata for one parsed item tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSummary {
    pub item_count: usize,
    pub hierarchy_depth: usize,
    pub has_location_grouping: bool,
    pub pricing_patterns: Vec<PricingFormat>,
}

pub fn summarize(items: &[Item]) -> TreeSummary {
    TreeSummary {
        item_count: items.len(),
        hierarchy_depth: tree_depth(items),
        has_location_grouping: has_location_grouping(items),
        pricing_patterns: pricing_patterns(items),
    }
}

/// Nesting depth of the tree, not the items' `depth` fields.
pub fn tree_depth(items: &[Item]) -> usize {
    items
        .iter()
        .map(|item| 1 + tree_depth(&item.children))
        .max()
        .unwrap_or(0)
}

/// Only top-level descriptions are checked.
pub fn has_location_grouping(items: &[Item]) -> bool {
    items.iter().any(|item| {
        let lower = item.description.to_lowercase();
        LOCATION_KEYWORDS.iter().any(|kw| lower.contains(kw))
    })
}

pub fn pricing_patterns(items: &[Item]) -> Vec<PricingFormat> {
    let mut found = Vec::new();
    collect_formats(items, &mut found);
    found.into_iter().sorted().dedup().collect()
}

fn collect_formats(items: &[Item], out: &mut Vec<PricingFormat>) {
    for item in items {
        if let Some(format) = item.pricing.as_ref().and_then(|p| p.format()) {
            out.push(format);
        }
        collect_formats(&item.children, out);
    }
}

// ── Tests ──
