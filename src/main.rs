mod actor_framework;
mod assembler;
mod checkout;
mod clients;
mod consumption_rules;
mod domain;
mod inventory;
mod orders;
mod payment;

mod app_system;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;
use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, Config, SystemError, TicketingSystem};
use crate::checkout::CheckoutError;
use crate::domain::{AuthenticatedUser, Cart, CategoryCreate, CategoryPatch};
use crate::payment::{MockPaymentAuthorizer, PaymentAuthorizer};

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    let config = Config::from_env();
    setup_tracing(&config.logging);

    info!("Starting ticket checkout demo");

    let authorizer = MockPaymentAuthorizer::new();
    let system = TicketingSystem::new(&config, Arc::new(authorizer.clone()));

    let span = tracing::info_span!("catalog_setup");
    let (general, lodging, vip) = async {
        info!("Registering ticket categories");
        let general = system.inventory.create_category(CategoryCreate::new("event_1", "general", 100, 5)).await?;
        let lodging = system
            .inventory
            .create_category(CategoryCreate::new("event_1", "community lodging", 150, 3))
            .await?;
        let vip = system.inventory.create_category(CategoryCreate::new("event_1", "vip", 200, 2)).await?;
        let vip = system
            .inventory
            .update_category(vip.id, CategoryPatch { price: Some(220), ..Default::default() })
            .await?;
        info!(category = %vip.title, price = vip.price, "Category repriced");
        Ok::<_, SystemError>((general, lodging, vip))
    }
    .instrument(span)
    .await?;

    let user = AuthenticatedUser::new("user_alice");

    // Lodging also draws down general admission.
    let carts = [
        Cart::default().with_item(lodging.id.clone(), 2),
        Cart::default().with_item(general.id.clone(), 1).with_item(vip.id.clone(), 1),
        Cart::default().with_item(general.id.clone(), 10),
    ];

    for cart in carts {
        let span = tracing::info_span!("checkout_demo");
        let result = system.checkout.checkout(&user, cart).instrument(span).await;
        match result {
            Ok(order) => info!(
                order_id = %order.id,
                total = order.total,
                items = order.items.len(),
                authorization_id = %order.payment.authorization_id,
                "Checkout succeeded"
            ),
            Err(CheckoutError::PersistenceFault { authorization, reason }) => {
                error!(reason = %reason, "Order lost after authorization, voiding");
                if let Err(e) = authorizer.void(&authorization).await {
                    error!(error = %e, "Void failed, manual reconciliation required");
                }
            }
            Err(e) => error!(error = %e, retryable = e.is_retryable(), "Checkout failed"),
        }
    }

    for category in [&general, &lodging, &vip] {
        let available = system.inventory.check_availability(category.id.clone()).await?;
        info!(
            category = %category.title,
            available,
            capacity = category.capacity,
            "Remaining stock"
        );
    }

    let history = system.orders.orders_for_user(user.id.clone()).await?;
    info!(orders = history.len(), "Order history loaded");

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
