use tracing::debug;

use super::lines::{is_item_start, resolve_depth, split_label};
use super::pricing::{
    classify_pricing, classify_with_span, has_price_marker, strip_prices, CURRENCY,
};
use crate::model::Item;

const TOTAL_PRICE_MARKER: &str = "total price";
const ADDITIVE_MARKERS: &[&str] = &["plus:", "additional:"];

/// Where the most recently opened item lives. New items are always appended,
/// so the open item is the last element of one of three sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Top,
    Child,
    Grandchild,
}

/// Line-by-line builder for the item tree.
///
/// Placement by depth, relative to the previous item's depth:
/// - depth 1 goes to the top level;
/// - depth 2 goes under the last top-level item, once a depth-1 item has been
///   seen and the previous depth is at least 1;
/// - depth 3 goes under the last child of the last top-level item, when the
///   previous depth is at least 2 and that child exists;
/// - everything else (depth 0, orphans, out-of-order jumps) is appended to the
///   top level. Malformed numbering flattens the tree, it never fails.
#[derive(Debug, Default)]
pub struct TreeAssembler {
    items: Vec<Item>,
    open: Option<Slot>,
    previous_depth: u8,
    seen_depth_one: bool,
}

impl TreeAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if is_item_start(line) {
            self.open_item(line);
        } else if let Some(item) = self.current_mut() {
            attach_to_open(item, line);
        } else {
            debug!(line, "discarding line before first item");
        }
    }

    pub fn finish(self) -> Vec<Item> {
        self.items
    }

    fn open_item(&mut self, line: &str) {
        let (label, remainder) = split_label(line);
        let depth = resolve_depth(&label);
        let item = build_item(&label, depth, &remainder);

        let slot = match depth {
            1 => {
                self.seen_depth_one = true;
                self.items.push(item);
                Slot::Top
            }
            2 if self.previous_depth >= 1 && self.seen_depth_one => match self.items.last_mut() {
                Some(parent) => {
                    parent.children.push(item);
                    Slot::Child
                }
                None => self.push_degenerate(item),
            },
            3 if self.previous_depth >= 2 => {
                match self.items.last_mut().and_then(|p| p.children.last_mut()) {
                    Some(parent) => {
                        parent.children.push(item);
                        Slot::Grandchild
                    }
                    None => self.push_degenerate(item),
                }
            }
            _ => self.push_degenerate(item),
        };

        self.open = Some(slot);
        self.previous_depth = depth;
    }

    fn push_degenerate(&mut self, item: Item) -> Slot {
        debug!(
            label = %item.label,
            depth = item.depth,
            previous_depth = self.previous_depth,
            "no parent for item, placing at top level"
        );
        self.items.push(item);
        Slot::Top
    }

    fn current_mut(&mut self) -> Option<&mut Item> {
        let top = self.items.last_mut()?;
        match self.open? {
            Slot::Top => Some(top),
            Slot::Child => top.children.last_mut(),
            Slot::Grandchild => top.children.last_mut()?.children.last_mut(),
        }
    }
}

/// Assemble the item tree from the lines of an item section.
pub fn assemble<'a, I>(lines: I) -> Vec<Item>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut assembler = TreeAssembler::new();
    for line in lines {
        assembler.push_line(line);
    }
    assembler.finish()
}

fn build_item(label: &str, depth: u8, remainder: &str) -> Item {
    if !has_price_marker(remainder) {
        return Item::new(label, depth, remainder);
    }

    // The classifier's match goes first so a unit expression leaves no
    // `₱600/unit` behind; any further separator-led prices follow it.
    let matched = classify_with_span(remainder);
    let without_match = match &matched.span {
        Some(span) => {
            let before = remainder[..span.start].trim_end();
            let after = remainder[span.end..].trim_start();
            join_words(before, after)
        }
        None => remainder.trim().to_string(),
    };
    let description = strip_prices(&without_match);

    let mut item = Item::new(label, depth, &description);
    item.pricing_mut().primary = Some(matched.pricing);
    item
}

/// Route a non-numbered line to the open item: price notes, add-ons and
/// surcharges when it carries a price, otherwise more description.
fn attach_to_open(item: &mut Item, line: &str) {
    if line.contains(CURRENCY) {
        let lower = line.to_lowercase();
        if lower.contains(TOTAL_PRICE_MARKER) {
            item.total_price_note = Some(line.to_string());
        } else if ADDITIVE_MARKERS.iter().any(|m| lower.contains(m)) {
            item.pricing_mut().additional.push(classify_pricing(line));
        } else {
            item.pricing_mut().calculations.push(line.to_string());
        }
    } else {
        item.description = join_words(&item.description, line);
    }
}

fn join_words(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PricingFormat;

    fn build(text: &str) -> Vec<Item> {
        assemble(text.lines())
    }

    #[test]
    fn flat_list() {
        let items = build("1. Clean unit – ₱600\n2. Repair – ₱1,500");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "1");
        assert_eq!(items[0].description, "Clean unit");
        assert_eq!(items[1].description, "Repair");
        let p = items[1].pricing.as_ref().unwrap().primary.as_ref().unwrap();
        assert_eq!(p.format, Some(PricingFormat::LumpSum));
        assert_eq!(p.amount, Some(1500));
    }

    #[test]
    fn three_levels() {
        let items = build("1. Aircon\na. Indoor\nii. Filter – ₱300\niii. Coil\nb. Outdoor\n2. Ducting");
        assert_eq!(items.len(), 2);
        let first = &items[0];
        assert_eq!(first.children.len(), 2);
        assert_eq!(first.children[0].label, "a");
        assert_eq!(first.children[0].children.len(), 2);
        assert_eq!(first.children[0].children[0].depth, 3);
        assert_eq!(first.children[0].children[1].label, "iii");
        assert!(first.children[1].children.is_empty());
        assert!(items[1].children.is_empty());
    }

    #[test]
    fn unit_price_removed_from_description() {
        let items = build("1. Cleaning of 49 units ₱600/unit – ₱29,400");
        assert_eq!(items[0].description, "Cleaning of 49 units");
        let p = items[0].pricing.as_ref().unwrap().primary.as_ref().unwrap();
        assert_eq!(p.format, Some(PricingFormat::UnitBased));
        assert_eq!(p.total, Some(29400));
    }

    #[test]
    fn every_price_removed_from_description() {
        let items = build("2. Clean – ₱500 and repair – ₱300");
        assert_eq!(items[0].description, "Clean and repair");
        let p = items[0].pricing.as_ref().unwrap().primary.as_ref().unwrap();
        assert_eq!(p.format, Some(PricingFormat::LumpSum));
        assert_eq!(p.amount, Some(500));
    }

    #[test]
    fn orphan_sub_item_goes_top_level() {
        let items = build("a. Sub task – ₱500");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "a");
        assert_eq!(items[0].depth, 2);
        assert_eq!(items[0].description, "Sub task");
    }

    #[test]
    fn orphan_roman_goes_top_level() {
        let items = build("1. Aircon\nii. Filter");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].depth, 3);
        assert!(items[0].children.is_empty());
    }

    #[test]
    fn roman_after_degenerate_sub_item() {
        // "a" lands at top level with no depth-1 parent, so "ii" has no child
        // of the last top-level item to hang from.
        let items = build("a. Indoor\nii. Filter");
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.children.is_empty()));
    }

    #[test]
    fn non_numbered_parenthesis_is_continuation() {
        let items = build("1. Aircon\n(ab) odd\nb. Outdoor");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Aircon (ab) odd");
        assert_eq!(items[0].children.len(), 1);
    }

    #[test]
    fn sub_item_after_degenerate_item_nests_under_it() {
        // "Mix" reads as a roman numeral with no depth-2 parent, lands at the
        // top level, and becomes the last top-level item.
        let items = build("1. Aircon\nMix. odd\nb. Outdoor");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].label, "Mix");
        assert_eq!(items[1].depth, 3);
        assert_eq!(items[1].children.len(), 1);
    }

    #[test]
    fn continuation_lines() {
        let items = build("1. Supply and install\nsplit type aircon\n2 HP");
        assert_eq!(items[0].description, "Supply and install split type aircon 2 HP");
    }

    #[test]
    fn continuation_into_empty_description() {
        let items = build("1.\nGeneral cleaning");
        assert_eq!(items[0].description, "General cleaning");
    }

    #[test]
    fn preamble_discarded() {
        let items = build("We are pleased to quote\n1. Repair");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Repair");
    }

    #[test]
    fn additional_and_calculation_lines() {
        let text = "1. Install unit – ₱8,500\nPlus: Installation – ₱19,500\nDistance surcharge ₱50 x 12km\nTotal Price – ₱28,000";
        let items = build(text);
        let item = &items[0];
        let pricing = item.pricing.as_ref().unwrap();
        assert_eq!(pricing.primary.as_ref().unwrap().amount, Some(8500));
        assert_eq!(pricing.additional.len(), 1);
        assert_eq!(pricing.additional[0].format, Some(PricingFormat::Additive));
        assert_eq!(pricing.additional[0].amount, Some(19500));
        assert_eq!(pricing.calculations, vec!["Distance surcharge ₱50 x 12km"]);
        assert_eq!(item.total_price_note.as_deref(), Some("Total Price – ₱28,000"));
    }

    #[test]
    fn extra_pricing_attaches_to_deepest_open_item() {
        let text = "1. Aircon\na. Indoor\nPlus: – ₱1,000";
        let items = build(text);
        assert!(items[0].pricing.is_none());
        let child = &items[0].children[0];
        let extra = &child.pricing.as_ref().unwrap().additional[0];
        assert_eq!(extra.label.as_deref(), Some("Installation"));
        assert!(child.pricing.as_ref().unwrap().primary.is_none());
    }

    #[test]
    fn dash_without_currency_keeps_text() {
        let items = build("1. Brand – Carrier");
        let p = items[0].pricing.as_ref().unwrap().primary.as_ref().unwrap();
        assert_eq!(p.format, None);
        assert_eq!(p.raw, "Brand – Carrier");
        assert_eq!(items[0].description, "Brand – Carrier");
    }

    #[test]
    fn deterministic() {
        let text = "1. Aircon – ₱500\na. Indoor\nii. Filter\nPlus: x – ₱5\n2. Duct\nnote";
        assert_eq!(build(text), build(text));
    }
}
