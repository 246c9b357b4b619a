use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::{CheckoutError, CheckoutState, Reservation, ReservationLog};
use crate::assembler::{AssembledOrder, OrderAssembler};
use crate::clients::{InventoryLedger, OrderStore};
use crate::consumption_rules::ConsumptionRules;
use crate::domain::{
    AuthenticatedUser, AuthorizationHandle, Cart, CartItem, CategoryId, Order, OrderCreate, TicketCategory,
};
use crate::payment::{AuthorizationMetadata, PaymentAuthorizer};

/// A cart line with the linked-rule reservation it drags along, if any.
#[derive(Debug)]
struct PlannedLine {
    item: CartItem,
    linked: Option<Reservation>,
}

/// Per-call bookkeeping: where the checkout is and what it has taken.
struct CheckoutRun {
    state: CheckoutState,
    reservations: ReservationLog,
}

impl CheckoutRun {
    fn new() -> Self {
        Self {
            state: CheckoutState::Validating,
            reservations: ReservationLog::new(),
        }
    }

    fn advance(&mut self, next: CheckoutState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal checkout transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "Checkout state transition");
        self.state = next;
        if next.is_terminal() {
            debug!(state = %next, reservations_held = self.reservations.len(), "Checkout finished");
        }
    }
}

/// Coordinates one checkout across the ledger, the processor and the order store.
///
/// Cheap to clone. Checkouts running in parallel only meet at the inventory
/// actor, which applies their reservations one at a time.
#[derive(Clone)]
pub struct CheckoutService {
    ledger: InventoryLedger,
    orders: OrderStore,
    authorizer: Arc<dyn PaymentAuthorizer>,
    rules: Arc<ConsumptionRules>,
    payment_timeout: Duration,
}

impl CheckoutService {
    pub fn new(
        ledger: InventoryLedger,
        orders: OrderStore,
        authorizer: Arc<dyn PaymentAuthorizer>,
        rules: ConsumptionRules,
        payment_timeout: Duration,
    ) -> Self {
        Self {
            ledger,
            orders,
            authorizer,
            rules: Arc::new(rules),
            payment_timeout,
        }
    }

    /// Runs the whole checkout for `user`.
    ///
    /// On success the order, its items and its payment have been committed
    /// and stock stays decremented. On any error, stock is back to what it was
    /// when the call started and nothing was written.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]. `PersistenceFault` carries an authorization the
    /// caller must void.
    #[instrument(skip(self, user, cart), fields(user_id = %user.id, lines = cart.len()))]
    pub async fn checkout(&self, user: &AuthenticatedUser, cart: Cart) -> Result<Order, CheckoutError> {
        info!("Processing checkout");
        let mut run = CheckoutRun::new();

        let plan = match self.plan(&cart).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "Checkout rejected during validation");
                run.advance(CheckoutState::Failed);
                return Err(e);
            }
        };

        run.advance(CheckoutState::Reserving);
        let assembled = match self.reserve_all(&plan, &mut run.reservations).await {
            Ok(assembled) => assembled,
            Err(e) => return Err(self.roll_back(&mut run, e).await),
        };

        run.advance(CheckoutState::Authorizing);
        let authorization = match self.authorize(user, &assembled).await {
            Ok(authorization) => authorization,
            Err(e) => return Err(self.roll_back(&mut run, e).await),
        };

        run.advance(CheckoutState::Committing);
        let params = OrderCreate {
            user_id: user.id.clone(),
            lines: assembled.lines,
            total: assembled.total,
            authorization: authorization.clone(),
        };
        match self.orders.commit(params).await {
            Ok(order) => {
                let reservations = run.reservations.commit();
                run.advance(CheckoutState::Done);
                info!(order_id = %order.id, total = order.total, reservations, "Checkout complete");
                Ok(order)
            }
            Err(e) => {
                error!(
                    authorization_id = %authorization.id,
                    error = %e,
                    "Order commit failed after authorization, authorization must be voided"
                );
                let fault = CheckoutError::PersistenceFault {
                    authorization,
                    reason: e.to_string(),
                };
                Err(self.roll_back(&mut run, fault).await)
            }
        }
    }

    /// Validating: cart shape, category existence and linked-rule resolution.
    /// Reads only. Categories are fetched by id; an event's categories are
    /// read only when a consumption rule has to search them.
    async fn plan(&self, cart: &Cart) -> Result<Vec<PlannedLine>, CheckoutError> {
        cart.validate()?;

        let mut categories: HashMap<CategoryId, TicketCategory> = HashMap::new();
        let mut events: HashMap<String, Vec<TicketCategory>> = HashMap::new();
        let mut plan = Vec::with_capacity(cart.len());

        for item in &cart.items {
            if !categories.contains_key(&item.category_id) {
                let category = self
                    .ledger
                    .get_category(item.category_id.clone())
                    .await?
                    .ok_or_else(|| CheckoutError::CategoryNotFound(item.category_id.clone()))?;
                categories.insert(item.category_id.clone(), category);
            }
            let category = &categories[&item.category_id];

            let linked = if self.rules.rule_for(&category.title).is_some() {
                if !events.contains_key(&category.event_id) {
                    let siblings = self.ledger.categories_in_event(category.event_id.clone()).await?;
                    events.insert(category.event_id.clone(), siblings);
                }
                self.rules.linked_category(category, &events[&category.event_id])?
            } else {
                None
            };

            let linked = match linked {
                Some(linked) => {
                    let quantity = linked.quantity_for(item.quantity).ok_or_else(|| {
                        CheckoutError::InvalidCart(format!("linked quantity overflows for {}", item.category_id))
                    })?;
                    Some(Reservation {
                        category_id: linked.category_id,
                        quantity,
                    })
                }
                None => None,
            };

            plan.push(PlannedLine {
                item: item.clone(),
                linked,
            });
        }

        Ok(plan)
    }

    /// Reserving: cart order, own category first, then the linked one.
    async fn reserve_all(
        &self,
        plan: &[PlannedLine],
        reservations: &mut ReservationLog,
    ) -> Result<AssembledOrder, CheckoutError> {
        let mut assembler = OrderAssembler::new();

        for line in plan {
            let CartItem { category_id, quantity } = &line.item;
            let unit_price = self.ledger.reserve(category_id.clone(), *quantity).await?;
            reservations.record(category_id.clone(), *quantity);

            if let Some(linked) = &line.linked {
                self.ledger.reserve(linked.category_id.clone(), linked.quantity).await?;
                reservations.record(linked.category_id.clone(), linked.quantity);
            }

            let line_total = assembler.add_line(category_id.clone(), *quantity, unit_price)?.line_total;
            debug!(category_id = %category_id, line_total, running_total = assembler.total(), "Line assembled");
        }

        Ok(assembler.finish()?)
    }

    /// Authorizing: exactly one attempt, bounded by the payment timeout.
    async fn authorize(
        &self,
        user: &AuthenticatedUser,
        assembled: &AssembledOrder,
    ) -> Result<AuthorizationHandle, CheckoutError> {
        let metadata = AuthorizationMetadata {
            user_id: user.id.clone(),
            lines: assembled
                .lines
                .iter()
                .map(|line| (line.category_id.clone(), line.quantity))
                .collect(),
        };

        let attempt = tokio::time::timeout(
            self.payment_timeout,
            self.authorizer.authorize(assembled.total, &metadata),
        )
        .await;
        let handle = match attempt {
            Ok(Ok(handle)) => handle,
            Ok(Err(e)) => {
                warn!(error = %e, transient = e.is_transient(), "Payment authorization failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout = ?self.payment_timeout, "Payment authorization timed out");
                return Err(CheckoutError::PaymentProviderError(format!(
                    "authorization timed out after {}ms",
                    self.payment_timeout.as_millis()
                )));
            }
        };

        if handle.amount != assembled.total {
            error!(
                authorization_id = %handle.id,
                authorized = handle.amount,
                total = assembled.total,
                "Processor authorized a different amount"
            );
            if let Err(e) = self.authorizer.void(&handle).await {
                error!(authorization_id = %handle.id, error = %e, "Failed to void mismatched authorization");
            }
            return Err(CheckoutError::PaymentProviderError(format!(
                "authorized {} instead of {}",
                handle.amount, assembled.total
            )));
        }

        info!(authorization_id = %handle.id, amount = handle.amount, "Payment authorized");
        Ok(handle)
    }

    /// RollingBack: releases every recorded reservation, newest first.
    async fn roll_back(&self, run: &mut CheckoutRun, cause: CheckoutError) -> CheckoutError {
        run.advance(CheckoutState::RollingBack);
        warn!(error = %cause, reservations = run.reservations.len(), "Rolling back checkout");
        if run.reservations.is_empty() {
            debug!("Nothing reserved yet");
        }

        for Reservation { category_id, quantity } in run.reservations.drain_newest_first() {
            if let Err(e) = self.ledger.release(category_id.clone(), quantity).await {
                error!(category_id = %category_id, quantity, error = %e, "Failed to release reservation");
            }
        }

        run.advance(CheckoutState::Failed);
        cause
    }
}
