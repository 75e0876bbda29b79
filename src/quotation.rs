use serde::{Deserialize, Serialize};

use crate::fields::{detect_fields, DetectedFields};
use crate::ingest::ExtractedDocument;
use crate::model::{DocumentParseResult, Item};

const COMPANY_NAME: &str = "Cebu Best Value Trading Corp.";
const COMPANY_LOCATION: &str = "Cebu City";
const COMPANY_PHONE: &str = "032-2670573";
const COMPANY_MOBILE: &str = "Sun-09325314857 Globe-09154657503";
const COMPANY_SERVICES: &[&str] = &["Sales", "Installation", "Service", "Repair"];
const DEFAULT_GREETING: &str = "Sir/Madam,";
const DEFAULT_EXCEPTION: &str = "(1) Circuit breaker and Gov't Fees\n(2) Power Supply";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub company_name: String,
    pub location: String,
    pub phone: String,
    pub mobile: String,
    pub services: Vec<String>,
}

impl Default for Header {
    fn default() -> Self {
        Header {
            company_name: COMPANY_NAME.to_string(),
            location: COMPANY_LOCATION.to_string(),
            phone: COMPANY_PHONE.to_string(),
            mobile: COMPANY_MOBILE.to_string(),
            services: COMPANY_SERVICES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub to: String,
    pub attention: String,
    pub greeting: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub warranty: String,
    pub terms_of_payment: String,
    pub exception: String,
    pub total_price: String,
}

/// The normalized quotation handed to the rendering step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: String,
    pub date_created: String,
    pub header: Header,
    pub customer: Customer,
    pub items: Vec<Item>,
    pub summary: Summary,
}

pub fn build_quotation(record: &ExtractedDocument, parsed: &DocumentParseResult) -> Quotation {
    let fields = record
        .detected_fields
        .clone()
        .unwrap_or_else(|| detect_fields(&record.extracted_text));
    let DetectedFields {
        date,
        to,
        attention,
        warranty,
        terms_of_payment,
        total_price,
        ..
    } = fields;

    Quotation {
        id: record
            .id
            .clone()
            .unwrap_or_else(|| quotation_id(&record.filename)),
        date_created: date.unwrap_or_default(),
        header: Header::default(),
        customer: Customer {
            to: to.unwrap_or_default(),
            attention: attention.unwrap_or_default(),
            greeting: DEFAULT_GREETING.to_string(),
        },
        items: parsed.items.clone(),
        summary: Summary {
            warranty: warranty.unwrap_or_default(),
            terms_of_payment: terms_of_payment.unwrap_or_default(),
            exception: DEFAULT_EXCEPTION.to_string(),
            total_price: total_price.unwrap_or_default(),
        },
    }
}

/// Everything before the first dot of the file name.
fn quotation_id(filename: &str) -> String {
    filename.split('.').next().unwrap_or_default().to_string()
}

// ── Tests ──
