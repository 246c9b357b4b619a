use tracing::{debug, warn};

use crate::actor_framework::Entity;
use crate::domain::{CategoryCreate, CategoryPatch, TicketCategory};
use super::actions::{InventoryAction, InventoryActionResult};
use super::error::InventoryError;

impl Entity for TicketCategory {
    type Id = String;
    type CreateParams = CategoryCreate;
    type Patch = CategoryPatch;
    type Action = InventoryAction;
    type ActionResult = InventoryActionResult;
    type Error = InventoryError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a category whose full initial stock is available.
    fn from_create(id: String, params: CategoryCreate) -> Result<Self, InventoryError> {
        Ok(Self {
            id,
            event_id: params.event_id,
            title: params.title,
            price: params.price,
            available_quantity: params.quantity,
            capacity: params.quantity,
        })
    }

    /// Updates catalog fields. Prices already captured by reservations are unaffected.
    fn on_update(&mut self, patch: CategoryPatch) -> Result<(), InventoryError> {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        Ok(())
    }

    /// Handles stock actions.
    ///
    /// # Errors
    /// - `Reserve(0)` / `Release(0)` are `InvalidQuantity`.
    /// - Reserving more than is available is `InsufficientInventory`.
    /// - Releasing past `capacity` is `ReleaseExceedsCapacity`.
    ///
    /// A failed action leaves `available_quantity` untouched.
    fn handle_action(&mut self, action: InventoryAction) -> Result<InventoryActionResult, InventoryError> {
        match action {
            InventoryAction::CheckAvailability => {
                Ok(InventoryActionResult::Availability(self.available_quantity))
            }
            InventoryAction::Reserve(0) | InventoryAction::Release(0) => {
                Err(InventoryError::InvalidQuantity(0))
            }
            InventoryAction::Reserve(quantity) => {
                if quantity > self.available_quantity {
                    warn!(
                        category_id = %self.id,
                        requested = quantity,
                        available = self.available_quantity,
                        "Insufficient inventory"
                    );
                    return Err(InventoryError::InsufficientInventory {
                        category_id: self.id.clone(),
                        requested: quantity,
                        available: self.available_quantity,
                    });
                }
                self.available_quantity -= quantity;
                debug!(category_id = %self.id, remaining = self.available_quantity, "Reserved");
                Ok(InventoryActionResult::Reserved {
                    unit_price: self.price,
                    remaining: self.available_quantity,
                })
            }
            InventoryAction::Release(quantity) => {
                let restored = self
                    .available_quantity
                    .checked_add(quantity)
                    .filter(|restored| *restored <= self.capacity)
                    .ok_or_else(|| InventoryError::ReleaseExceedsCapacity {
                        category_id: self.id.clone(),
                        quantity,
                        available: self.available_quantity,
                        capacity: self.capacity,
                    })?;
                self.available_quantity = restored;
                debug!(category_id = %self.id, available = restored, "Released");
                Ok(InventoryActionResult::Released { available: restored })
            }
        }
    }
}
