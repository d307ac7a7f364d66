//! Decide Core Library
//!
//! Shared types and logic for Decide applications: saved-item persistence,
//! debounced auto-save, and unit-price comparison.

pub mod autosave;
pub mod models;
pub mod repository;
pub mod store;
pub mod unit_price;

pub use autosave::{AutoSaveConfig, AutoSaveController, AutoSaveStatus};
pub use models::{
    Category, ComparisonState, CostState, DateSpanState, ProsConsState, Product, SavedData,
    SavedItem, Unit, UnitPriceState,
};
pub use repository::{RepositoryError, SavedItemRepository};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use unit_price::{best_value_indices, parse_amount};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
