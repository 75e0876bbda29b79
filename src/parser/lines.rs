use std::sync::LazyLock;

use regex::Regex;

/// Numbering grammars in precedence order. Each captures the label and the
/// text after it.
static ITEM_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^(\d+)[.)]\s*(.*)$",         // 1.  1)
        r"(?i)^\((\d+)\)\s*(.*)$",         // (1)
        r"(?i)^([a-z])[.)]\s*(.*)$",       // a.  a)
        r"(?i)^\(([a-z])\)\s*(.*)$",       // (a)
        r"(?i)^([ivxlcdm]+)[.)]\s*(.*)$",  // iv. iv)
        r"(?i)^\(([ivxlcdm]+)\)\s*(.*)$",  // (iv)
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const ROMAN_CHARS: &[char] = &['i', 'v', 'x', 'l', 'c', 'd', 'm'];

/// Does this line open a new item?
pub fn is_item_start(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }
    ITEM_RES.iter().any(|re| re.is_match(line))
}

/// Split a numbered line into its label (case as written) and the remaining
/// text. Returns `("", line)` when no numbering grammar matches.
pub fn split_label(line: &str) -> (String, String) {
    let line = line.trim();
    for re in ITEM_RES.iter() {
        if let Some(caps) = re.captures(line) {
            return (caps[1].to_string(), caps[2].to_string());
        }
    }
    (String::new(), line.to_string())
}

/// Map a numbering label to its hierarchy depth.
///
/// Digits are depth 1, multi-character roman numerals depth 3, and any single
/// letter depth 2. A lone "i" or "v" therefore reads as a lettered sub-item:
/// length is the only signal separating the two, and lettered lists usually
/// come before roman ones. Anything else is 0.
pub fn resolve_depth(label: &str) -> u8 {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return 0;
    }
    if label.chars().all(|c| c.is_ascii_digit()) {
        return 1;
    }
    if label.chars().count() > 1 && label.chars().all(|c| ROMAN_CHARS.contains(&c)) {
        return 3;
    }
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => 2,
        _ => 0,
    }
}

// ── Tests ──
