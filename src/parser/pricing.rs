use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{Pricing, PricingFormat};

pub const CURRENCY: char = '₱';
pub const SEPARATORS: &[char] = &['–', '='];
pub const DEFAULT_ADDITIVE_LABEL: &str = "Installation";

static ADDITIVE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)plus:|additional:").unwrap());
static ADDITIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:plus|additional):\s*([^–=₱]*?)\s*(?P<tail>[–=]\s*₱\s*(?P<amount>[0-9][0-9,]*))")
        .unwrap()
});
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)₱\s*([0-9][0-9,]*)\s*/\s*unit\s*[–=]\s*₱\s*([0-9][0-9,]*)").unwrap()
});
static LUMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[–=]\s*₱\s*([0-9][0-9,]*)").unwrap());
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"₱\s*([0-9][0-9,]*)").unwrap());
static PRICE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[–=]\s*₱\s*[0-9][0-9,]*").unwrap());

/// A classified fragment together with the byte range of the text that
/// carried the price, so callers can cut it out of a description.
#[derive(Debug, Clone)]
pub struct PricingMatch {
    pub pricing: Pricing,
    pub span: Option<Range<usize>>,
}

/// Classify a money-bearing fragment. See [`classify_with_span`].
pub fn classify_pricing(text: &str) -> Pricing {
    classify_with_span(text).pricing
}

/// Precedence: additive, unit-based, lump-sum, calculation. A fragment with no
/// currency-prefixed integer anywhere is left unclassified.
pub fn classify_with_span(text: &str) -> PricingMatch {
    let mut pricing = Pricing::unrecognized(text);

    let Some(first_amount) = AMOUNT_RE.captures(text).and_then(|c| amount(&c, 1)) else {
        return PricingMatch { pricing, span: None };
    };

    if ADDITIVE_MARKER_RE.is_match(text) {
        pricing.format = Some(PricingFormat::Additive);
        if let Some(caps) = ADDITIVE_RE.captures(text) {
            let label = caps[1].trim();
            pricing.label = Some(if label.is_empty() {
                DEFAULT_ADDITIVE_LABEL.to_string()
            } else {
                label.to_string()
            });
            pricing.amount = caps
                .name("amount")
                .and_then(|m| parse_amount(m.as_str()));
            let span = caps.name("tail").map(|m| m.range());
            return PricingMatch { pricing, span };
        }
        pricing.label = Some(DEFAULT_ADDITIVE_LABEL.to_string());
        // A price before the separator hides the label; the amount is still
        // the one after the separator.
        if let Some(caps) = LUMP_RE.captures(text) {
            pricing.amount = amount(&caps, 1);
            let span = caps.get(0).map(|m| m.range());
            return PricingMatch { pricing, span };
        }
        // Marker without a separator: keep the first amount on the line.
        pricing.amount = Some(first_amount);
        return PricingMatch { pricing, span: None };
    }

    if let Some(caps) = UNIT_RE.captures(text) {
        if let (Some(unit_price), Some(total)) = (amount(&caps, 1), amount(&caps, 2)) {
            pricing.format = Some(PricingFormat::UnitBased);
            pricing.unit_price = Some(unit_price);
            pricing.total = Some(total);
            let span = caps.get(0).map(|m| m.range());
            return PricingMatch { pricing, span };
        }
    }

    if let Some(caps) = LUMP_RE.captures(text) {
        if let Some(value) = amount(&caps, 1) {
            pricing.format = Some(PricingFormat::LumpSum);
            pricing.amount = Some(value);
            let span = caps.get(0).map(|m| m.range());
            return PricingMatch { pricing, span };
        }
    }

    // Surcharges and adjustments: a price with no recognizable shape.
    pricing.format = Some(PricingFormat::Calculation);
    pricing.amount = Some(first_amount);
    PricingMatch { pricing, span: None }
}

/// Does the fragment carry any pricing cue (separator or currency symbol)?
pub fn has_price_marker(text: &str) -> bool {
    text.contains(CURRENCY) || text.contains(SEPARATORS)
}

/// Remove every separator-led price (`– ₱1,200`, `= ₱300`) from a fragment.
pub fn strip_prices(text: &str) -> String {
    PRICE_RUN_RE.replace_all(text, "").trim().to_string()
}

/// Strip thousands separators and parse whole currency units. Values past
/// `u64::MAX` saturate.
pub fn parse_amount(digits: &str) -> Option<u64> {
    let cleaned: String = digits.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(cleaned.parse().unwrap_or(u64::MAX))
}

fn amount(caps: &Captures, group: usize) -> Option<u64> {
    caps.get(group).and_then(|m| parse_amount(m.as_str()))
}

// ── Tests ──
