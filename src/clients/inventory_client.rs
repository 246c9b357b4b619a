use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{CategoryCreate, CategoryPatch, TicketCategory};
use crate::inventory::{InventoryAction, InventoryActionResult, InventoryError};

/// The inventory ledger: the only way stock counts change.
///
/// `reserve` and `release` are single actor actions, so concurrent checkouts
/// against one category are applied one after another and cannot overdraw.
#[derive(Clone)]
pub struct InventoryLedger {
    inner: ResourceClient<TicketCategory>,
}

impl_basic_client!(InventoryLedger, TicketCategory, InventoryError, category, categories);

fn unexpected(result: InventoryActionResult) -> InventoryError {
    InventoryError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}

impl InventoryLedger {
    #[instrument(skip(self))]
    pub async fn create_category(&self, params: CategoryCreate) -> Result<TicketCategory, InventoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(InventoryError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_category(&self, id: String, patch: CategoryPatch) -> Result<TicketCategory, InventoryError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(InventoryError::from)
    }

    #[instrument(skip(self))]
    pub async fn check_availability(&self, id: String) -> Result<u32, InventoryError> {
        debug!("Sending request");
        match self.inner.perform_action(id, InventoryAction::CheckAvailability).await? {
            InventoryActionResult::Availability(available) => Ok(available),
            other => Err(unexpected(other)),
        }
    }

    /// Every category of `event_id`. The store is keyed by id only, so this
    /// filters a full listing.
    #[instrument(skip(self))]
    pub async fn categories_in_event(&self, event_id: String) -> Result<Vec<TicketCategory>, InventoryError> {
        debug!("Sending request");
        let mut categories = self.inner.list().await?;
        categories.retain(|category| category.event_id == event_id);
        Ok(categories)
    }

    /// Takes `quantity` tickets and returns the unit price at that moment.
    #[instrument(skip(self))]
    pub async fn reserve(&self, id: String, quantity: u32) -> Result<u64, InventoryError> {
        debug!("Sending request");
        match self.inner.perform_action(id, InventoryAction::Reserve(quantity)).await? {
            InventoryActionResult::Reserved { unit_price, .. } => Ok(unit_price),
            other => Err(unexpected(other)),
        }
    }

    /// Returns `quantity` tickets taken by an earlier `reserve`.
    #[instrument(skip(self))]
    pub async fn release(&self, id: String, quantity: u32) -> Result<u32, InventoryError> {
        debug!("Sending request");
        match self.inner.perform_action(id, InventoryAction::Release(quantity)).await? {
            InventoryActionResult::Released { available } => Ok(available),
            other => Err(unexpected(other)),
        }
    }
}
