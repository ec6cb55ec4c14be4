//! Random-suggestion catalog entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sakaya_core::{Category, Price, RandomHistoryId, SuggestionId};

/// An item the random page can propose.
///
/// The suggestion list is independent of the product collection and is not
/// stock-tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: SuggestionId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub description: String,
    pub alcohol_percent: Decimal,
    pub tags: Vec<String>,
    pub pairing: Vec<String>,
}

/// A persisted draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomHistoryEntry {
    pub id: RandomHistoryId,
    pub suggestion: Suggestion,
    /// Epoch milliseconds.
    pub timestamp: i64,
}
