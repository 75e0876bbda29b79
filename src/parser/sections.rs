use std::sync::LazyLock;

use regex::Regex;

/// Headings that close the item block, in the order documents usually list them.
pub const END_MARKERS: &[&str] = &[
    "Terms of Payment",
    "Warranty",
    "Exception",
    "Thank you",
    "Conforme",
];

static START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Job to be done\s*:").unwrap());
static END_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = END_MARKERS.iter().map(|m| regex::escape(m)).collect();
    Regex::new(&format!("(?i){}", alternatives.join("|"))).unwrap()
});

/// Slice the item block out of a full document: everything after
/// "Job to be done:" up to the earliest end marker. Lines come back trimmed,
/// blanks dropped. No start marker means no items.
pub fn extract_item_section(full_text: &str) -> Vec<&str> {
    let Some(start) = START_RE.find(full_text) else {
        return Vec::new();
    };
    let rest = &full_text[start.end()..];
    let end = END_RE.find(rest).map(|m| m.start()).unwrap_or(rest.len());

    rest[..end]
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

// ── Tests ──
