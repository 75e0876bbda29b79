use std::path::Path;

use quote_items::fields::detect_fields;
use quote_items::ingest::load_record;
use quote_items::quotation::build_quotation;
use quote_items::{parse_document, DocumentParseResult, Item, PricingFormat};

fn parse_fixture(name: &str) -> DocumentParseResult {
    let record = load_record(Path::new(&format!("tests/fixtures/{}", name))).unwrap();
    parse_document(&record.filename, &record.extracted_text)
}

fn primary_format(item: &Item) -> Option<PricingFormat> {
    item.pricing.as_ref()?.primary.as_ref()?.format
}

#[test]
fn aircon_structure() {
    let r = parse_fixture("aircon.txt");
    assert_eq!(r.filename, "aircon.txt");
    assert_eq!(r.item_count, 3);
    assert_eq!(r.hierarchy_depth, 3);
    assert!(!r.has_location_grouping);
    assert_eq!(
        r.pricing_patterns,
        vec![PricingFormat::LumpSum, PricingFormat::UnitBased]
    );

    let labels: Vec<_> = r.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2", "3"]);

    let first = &r.items[0];
    assert_eq!(
        first.description,
        "Supply and installation of split type aircon Carrier 2.0 HP inverter"
    );
    assert_eq!(first.children.len(), 2);
    let outdoor = &first.children[1];
    assert_eq!(outdoor.description, "Outdoor unit");
    let extra = &outdoor.pricing.as_ref().unwrap().additional;
    assert_eq!(extra.len(), 1);
    assert_eq!(extra[0].amount, Some(19500));

    let cleaning = &r.items[1];
    assert_eq!(cleaning.description, "General cleaning 49 units window type");
    assert_eq!(primary_format(cleaning), Some(PricingFormat::UnitBased));
    assert!(cleaning.children.is_empty());
}

#[test]
fn aircon_three_levels_have_parent_chain() {
    let r = parse_fixture("aircon.txt");
    let ducting = &r.items[2];
    assert_eq!(ducting.depth, 1);
    let trunk = &ducting.children[0];
    assert_eq!(trunk.depth, 2);
    let roman: Vec<_> = trunk.children.iter().map(|i| (i.label.as_str(), i.depth)).collect();
    assert_eq!(roman, vec![("ii", 3), ("iii", 3)]);

    let branch = &ducting.children[1];
    assert_eq!(primary_format(branch), Some(PricingFormat::LumpSum));
    let pricing = branch.pricing.as_ref().unwrap();
    assert_eq!(pricing.calculations, vec!["Distance surcharge ₱50 x 12km"]);
    assert_eq!(branch.total_price_note.as_deref(), Some("Total Price – ₱144,400"));
}

#[test]
fn office_record() {
    let r = parse_fixture("office_extracted.json");
    assert_eq!(r.filename, "office.pdf");
    assert_eq!(r.item_count, 3);
    assert_eq!(r.hierarchy_depth, 2);
    assert!(r.has_location_grouping);
    assert_eq!(r.items[2].label, "3");
    assert_eq!(r.items[2].description, "Ground Floor Lobby");

    let cleaning = &r.items[0].children[0];
    let p = cleaning.pricing.as_ref().unwrap().primary.as_ref().unwrap();
    assert_eq!(p.unit_price, Some(1200));
    assert_eq!(p.total, Some(12000));
    assert_eq!(cleaning.description, "Cleaning");

    let compressor = &r.items[1].children[0];
    let extra = &compressor.pricing.as_ref().unwrap().additional[0];
    assert_eq!(extra.label.as_deref(), Some("Copper pipe extension"));
}

#[test]
fn serialized_contract() {
    let r = parse_fixture("aircon.txt");
    let v = serde_json::to_value(&r).unwrap();
    let first = &v["items"][0];
    assert_eq!(first["number"], "1");
    assert_eq!(first["level"], 1);
    assert!(first["pricing"].is_null());
    assert_eq!(first["children"][0]["pricing"]["format"], "lump-sum");
    assert!(first["children"][0].get("children").is_none());
    assert_eq!(v["pricing_patterns"], serde_json::json!(["lump-sum", "unit-based"]));
}

#[test]
fn repeatable() {
    assert_eq!(parse_fixture("aircon.txt"), parse_fixture("aircon.txt"));
}

#[test]
fn orphan_sub_item_document() {
    let r = parse_document("orphan.pdf", "Job to be done:\na. Sub task – ₱500");
    assert_eq!(r.item_count, 1);
    assert_eq!(r.items[0].label, "a");
    assert_eq!(r.items[0].depth, 2);
    assert_eq!(r.hierarchy_depth, 1);
}

#[test]
fn location_grouping_document() {
    let r = parse_document("loc.pdf", "Job to be done:\n1. 3rd Floor Office - AC units");
    assert!(r.has_location_grouping);
}

#[test]
fn quotation_from_text_fixture() {
    let record = load_record(Path::new("tests/fixtures/aircon.txt")).unwrap();
    let parsed = parse_document(&record.filename, &record.extracted_text);
    let q = build_quotation(&record, &parsed);
    assert_eq!(q.id, "aircon");
    assert_eq!(q.customer.to, "Harbor View Hotel");
    assert_eq!(q.summary.total_price, "₱144,400");
    assert_eq!(q.summary.warranty, "1 year on parts and service");
    assert_eq!(q.items.len(), 3);
}

#[test]
fn fields_from_text_fixture() {
    let record = load_record(Path::new("tests/fixtures/aircon.txt")).unwrap();
    let f = detect_fields(&record.extracted_text);
    assert_eq!(f.date.as_deref(), Some("05/14/2024"));
    assert_eq!(f.attention.as_deref(), Some("Mr. Dela Cruz"));
    assert_eq!(
        f.terms_of_payment.as_deref(),
        Some("50% down payment, balance upon completion")
    );
}
