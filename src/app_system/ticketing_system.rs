use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::{Config, SystemError};
use crate::actor_framework::ResourceActor;
use crate::checkout::CheckoutService;
use crate::clients::{InventoryLedger, OrderStore};
use crate::consumption_rules::ConsumptionRules;
use crate::domain::{Order, TicketCategory};
use crate::payment::PaymentAuthorizer;

fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The running checkout system.
///
/// Starts the store actors, wires their clients into the checkout service and
/// owns the task handles for shutdown.
pub struct TicketingSystem {
    pub inventory: InventoryLedger,
    pub orders: OrderStore,
    pub checkout: CheckoutService,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl TicketingSystem {
    /// Starts the system with the default consumption rules.
    pub fn new(config: &Config, authorizer: Arc<dyn PaymentAuthorizer>) -> Self {
        Self::with_rules(config, authorizer, ConsumptionRules::default())
    }

    #[instrument(name = "ticketing_system", skip_all)]
    pub fn with_rules(config: &Config, authorizer: Arc<dyn PaymentAuthorizer>, rules: ConsumptionRules) -> Self {
        info!("Starting ticketing system");
        let buffer_size = config.actors.buffer_size;

        let (inventory_actor, inventory_client) =
            ResourceActor::<TicketCategory>::new("inventory", buffer_size, sequential_ids("category"));
        let inventory = InventoryLedger::new(inventory_client);
        let inventory_handle = tokio::spawn(inventory_actor.run());

        let (order_actor, order_client) = ResourceActor::<Order>::new("orders", buffer_size, sequential_ids("order"));
        let orders = OrderStore::new(order_client);
        let order_handle = tokio::spawn(order_actor.run());

        let checkout = CheckoutService::new(
            inventory.clone(),
            orders.clone(),
            authorizer,
            rules,
            config.checkout.payment_timeout(),
        );

        info!("Ticketing system started");
        Self {
            inventory,
            orders,
            checkout,
            handles: vec![inventory_handle, order_handle],
        }
    }

    /// Stops both store actors and waits for their tasks.
    ///
    /// An actor that already stopped is not an error.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down ticketing system");

        if let Err(e) = self.orders.shutdown().await {
            info!(error = %e, "Order actor already stopped");
        }
        if let Err(e) = self.inventory.shutdown().await {
            info!(error = %e, "Inventory actor already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(SystemError::Task(e));
            }
        }

        info!("Ticketing system shutdown complete");
        Ok(())
    }
}
