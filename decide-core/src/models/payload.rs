use serde::{Deserialize, Serialize};

use super::product::Product;
use super::saved_item::Category;

/// Payload of a saved item.
///
/// Each screen's state is a concrete variant rather than free-form JSON, so a
/// persisted blob either parses into a known shape or is rejected at the
/// serialization boundary. The serde tag doubles as the discriminator used to
/// clear one calculator's items from the shared calculation key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SavedData {
    UnitPrice(UnitPriceState),
    Cost(CostState),
    DateSpan(DateSpanState),
    Comparison(ComparisonState),
    ProsCons(ProsConsState),
}

impl SavedData {
    /// The discriminator value written to the `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            SavedData::UnitPrice(_) => "unit_price",
            SavedData::Cost(_) => "cost",
            SavedData::DateSpan(_) => "date_span",
            SavedData::Comparison(_) => "comparison",
            SavedData::ProsCons(_) => "pros_cons",
        }
    }

    /// The category whose storage key holds items with this payload.
    ///
    /// The three calculators share one key; comparison tables and pros/cons
    /// lists each have their own.
    pub fn category(&self) -> Category {
        match self {
            SavedData::UnitPrice(_) | SavedData::Cost(_) | SavedData::DateSpan(_) => {
                Category::Calculation
            }
            SavedData::Comparison(_) => Category::Comparison,
            SavedData::ProsCons(_) => Category::Decision,
        }
    }
}

/// Unit-price calculator state: the product rows as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UnitPriceState {
    pub products: Vec<Product>,
}

/// Cost calculator state: labeled amounts plus an optional tax percentage,
/// both kept as raw input strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostState {
    pub items: Vec<CostItem>,
    #[serde(default)]
    pub tax_percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostItem {
    pub name: String,
    pub amount: String,
}

/// Date calculator state: two ISO dates as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DateSpanState {
    pub start_date: String,
    pub end_date: String,
}

/// Comparison table state: options scored against weighted criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComparisonState {
    pub options: Vec<String>,
    pub criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Criterion {
    pub name: String,
    pub weight: f64,
    /// One score per option, in option order.
    pub scores: Vec<f64>,
}

/// Pros/cons list state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProsConsState {
    pub topic: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}
