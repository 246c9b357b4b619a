use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CategoryId;

pub type OrderId = String;

/// Opaque token from the payment processor for an approved charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationHandle {
    pub id: String,
    /// Secret handed back to the buyer's client to confirm the charge.
    pub client_secret: String,
    pub amount: u64,
}

/// A priced cart line, captured at reservation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub category_id: CategoryId,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
}

/// A committed checkout: items and payment are written together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: u64,
    pub created_at: DateTime<Utc>,
    pub payment: Payment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: OrderId,
    pub category_id: CategoryId,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Authorized,
    #[allow(dead_code)]
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub order_id: OrderId,
    pub authorization_id: String,
    pub client_secret: String,
    pub amount: u64,
    pub status: PaymentStatus,
}

/// Everything the order store needs to write an order in one step.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    pub total: u64,
    pub authorization: AuthorizationHandle,
}

impl Order {
    /// Assembles the order record; the store assigns `id`.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        let items = params
            .lines
            .into_iter()
            .map(|line| OrderItem {
                order_id: id.clone(),
                category_id: line.category_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            })
            .collect();
        let payment = Payment {
            order_id: id.clone(),
            authorization_id: params.authorization.id,
            client_secret: params.authorization.client_secret,
            amount: params.authorization.amount,
            status: PaymentStatus::Authorized,
        };
        Self {
            id,
            user_id: params.user_id,
            items,
            total: params.total,
            created_at: Utc::now(),
            payment,
        }
    }

    /// Sum of line totals, or `None` on overflow.
    pub fn items_total(&self) -> Option<u64> {
        self.items
            .iter()
            .try_fold(0u64, |acc, item| acc.checked_add(item.line_total))
    }
}
