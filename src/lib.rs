//! Turns the text of a scanned or exported quotation into a tree of numbered
//! line items with classified pricing.
//!
//! The core lives in [`parser`] and is a pure function of its input text;
//! everything else loads records, runs batches, or reshapes the result for
//! downstream consumers.

pub mod batch;
pub mod error;
pub mod fields;
pub mod ingest;
pub mod model;
pub mod parser;
pub mod quotation;
pub mod settings;

pub use model::{DocumentParseResult, Item, ItemPricing, Pricing, PricingFormat};
pub use parser::parse_document;
