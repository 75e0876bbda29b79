use serde::{Deserialize, Serialize};

/// Shape of a money-bearing text fragment.
///
/// Variants are declared in lexical order of their serialized names so that
/// sorted collections of formats come out alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingFormat {
    Additive,
    Calculation,
    LumpSum,
    UnitBased,
}

impl PricingFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingFormat::Additive => "additive",
            PricingFormat::Calculation => "calculation",
            PricingFormat::LumpSum => "lump-sum",
            PricingFormat::UnitBased => "unit-based",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub format: Option<PricingFormat>,
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unit_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl Pricing {
    pub fn unrecognized(raw: &str) -> Self {
        Pricing {
            format: None,
            raw: raw.to_string(),
            unit_price: None,
            total: None,
            amount: None,
            label: None,
        }
    }
}

/// Pricing attached to an item: the price on the item line itself plus any
/// "Plus:" lines and surcharge lines that followed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPricing {
    #[serde(flatten)]
    pub primary: Option<Pricing>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub additional: Vec<Pricing>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub calculations: Vec<String>,
}

impl ItemPricing {
    /// Format of the price stated on the item line itself. Add-on and
    /// surcharge lines do not count.
    pub fn format(&self) -> Option<PricingFormat> {
        self.primary.as_ref()?.format
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "number")]
    pub label: String,
    pub description: String,
    #[serde(rename = "level")]
    pub depth: u8,
    pub pricing: Option<ItemPricing>,
    #[serde(rename = "total_price", skip_serializing_if = "Option::is_none", default)]
    pub total_price_note: Option<String>,
    // An empty children list is never serialized; downstream consumers test
    // for the key's presence.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<Item>,
}

impl Item {
    pub fn new(label: &str, depth: u8, description: &str) -> Self {
        Item {
            label: label.to_string(),
            description: description.to_string(),
            depth,
            pricing: None,
            total_price_note: None,
            children: Vec::new(),
        }
    }

    pub fn pricing_mut(&mut self) -> &mut ItemPricing {
        self.pricing.get_or_insert_with(ItemPricing::default)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentParseResult {
    pub filename: String,
    pub items: Vec<Item>,
    pub item_count: usize,
    pub hierarchy_depth: usize,
    pub has_location_grouping: bool,
    pub pricing_patterns: Vec<PricingFormat>,
}

// ── Tests ──
