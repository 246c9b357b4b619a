/// Custom actions for ticket categories.
///
/// Each action is applied by the inventory actor as one step, so a reserve is
/// a check-and-decrement that no other request can interleave with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryAction {
    /// Reads the current available quantity.
    CheckAvailability,
    /// Takes `u32` tickets out of the available pool.
    ///
    /// # Errors
    /// Fails without touching stock if more is requested than is available.
    Reserve(u32),
    /// Returns `u32` previously reserved tickets to the pool.
    Release(u32),
}

/// Results from InventoryActions - variants match 1:1 with InventoryAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryActionResult {
    Availability(u32),
    /// Unit price at the moment of reservation and the stock left after it.
    Reserved { unit_price: u64, remaining: u32 },
    Released { available: u32 },
}
