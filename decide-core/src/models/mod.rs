mod payload;
mod product;
mod saved_item;

pub use payload::{
    ComparisonState, CostItem, CostState, Criterion, DateSpanState, ProsConsState, SavedData,
    UnitPriceState,
};
pub use product::{Product, Unit};
pub use saved_item::{Category, SavedItem};
