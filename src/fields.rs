use serde::{Deserialize, Serialize};

/// Header and footer values a quotation states outside the item block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedFields {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attention: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub terms_of_payment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub warranty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_price: Option<String>,
}

/// Scan every line for labelled fields. Each line feeds at most one field;
/// later lines overwrite earlier ones, except `phone` which keeps the first.
pub fn detect_fields(text: &str) -> DetectedFields {
    let mut fields = DetectedFields::default();

    for line in text.lines() {
        let line = line.trim();

        if line.contains("Date :") {
            fields.date = Some(strip_label(line, &["Date :"]));
        } else if line.contains("To :") {
            fields.to = Some(strip_label(line, &["To :"]));
        } else if line.contains("Attention :") {
            fields.attention = Some(strip_label(line, &["Attention :"]));
        } else if line.to_lowercase().contains("cell") && line.contains('-') {
            if fields.phone.is_none() {
                fields.phone = Some(line.to_string());
            }
        } else if line.contains("Terms of Payment:") {
            fields.terms_of_payment = Some(strip_label(line, &["Terms of Payment:"]));
        } else if line.contains("Warranty:") {
            fields.warranty = Some(strip_label(line, &["Warranty:"]));
        } else if line.contains("Total Price –") || line.contains("Total Price -") {
            fields.total_price = Some(strip_label(line, &["Total Price –", "Total Price -"]));
        }
    }

    fields
}

fn strip_label(line: &str, labels: &[&str]) -> String {
    let mut out = line.to_string();
    for label in labels {
        out = out.replace(label, "");
    }
    out.trim().to_string()
}

// ── Tests ──
