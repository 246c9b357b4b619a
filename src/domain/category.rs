use serde::{Deserialize, Serialize};

pub type CategoryId = String;

/// A purchasable ticket type with its own price and stock count.
///
/// `capacity` is the highest value `available_quantity` may be restored to by
/// a release; reservations only ever move the count between zero and there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketCategory {
    pub id: CategoryId,
    pub event_id: String,
    pub title: String,
    /// Unit price in minor currency units.
    pub price: u64,
    pub available_quantity: u32,
    pub capacity: u32,
}

/// Params for registering a category in the catalog.
#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub event_id: String,
    pub title: String,
    pub price: u64,
    pub quantity: u32,
}

impl CategoryCreate {
    pub fn new(event_id: impl Into<String>, title: impl Into<String>, price: u64, quantity: u32) -> Self {
        Self {
            event_id: event_id.into(),
            title: title.into(),
            price,
            quantity,
        }
    }
}

/// Catalog edits. Stock is only ever changed through reservations.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub title: Option<String>,
    pub price: Option<u64>,
}
