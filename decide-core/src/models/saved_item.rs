use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::payload::SavedData;

/// Logical grouping of saved items. Each category owns one storage key
/// holding a JSON array of [`SavedItem`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Calculation,
    Comparison,
    Decision,
}

impl Category {
    /// Storage key holding this category's collection.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Category::Calculation => "saved_calculations",
            Category::Comparison => "saved_comparisons",
            Category::Decision => "saved_decisions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Calculation => write!(f, "calculation"),
            Category::Comparison => write!(f, "comparison"),
            Category::Decision => write!(f, "decision"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "calculation" => Ok(Category::Calculation),
            "comparison" => Ok(Category::Comparison),
            "decision" => Ok(Category::Decision),
            _ => Err(format!(
                "Invalid category '{}'. Valid options: calculation, comparison, decision",
                s
            )),
        }
    }
}

/// A persisted snapshot of one screen's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: Uuid,
    pub name: String,
    pub data: SavedData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// True for records written by the auto-save controller. At most one such
    /// record exists per category; subsequent auto-saves update it in place.
    pub auto_saved: bool,
}

impl SavedItem {
    pub fn new(name: impl Into<String>, data: SavedData, auto_saved: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            data,
            created_at: now,
            updated_at: now,
            auto_saved,
        }
    }
}
