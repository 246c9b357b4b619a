use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate};
use super::error::OrderStoreError;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = (); // Orders are immutable once committed
    type Action = ();
    type ActionResult = ();
    type Error = OrderStoreError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, params: OrderCreate) -> Result<Self, OrderStoreError> {
        Ok(Order::new(id, params))
    }

    /// Rejects the whole write unless items, total and payment agree.
    fn on_create(&mut self) -> Result<(), OrderStoreError> {
        if self.items.is_empty() {
            return Err(OrderStoreError::NoItems);
        }
        let items_total = self.items_total();
        if items_total != Some(self.total) {
            return Err(OrderStoreError::TotalMismatch { total: self.total, items_total });
        }
        if self.payment.amount != self.total {
            return Err(OrderStoreError::PaymentMismatch {
                total: self.total,
                authorized: self.payment.amount,
            });
        }
        Ok(())
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderStoreError> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), OrderStoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorizationHandle, OrderLine, PaymentStatus};

    fn params(total: u64, authorized: u64, lines: Vec<OrderLine>) -> OrderCreate {
        OrderCreate {
            user_id: "user_1".into(),
            lines,
            total,
            authorization: AuthorizationHandle {
                id: "auth_1".into(),
                client_secret: "secret".into(),
                amount: authorized,
            },
        }
    }

    fn line(category_id: &str, quantity: u32, unit_price: u64) -> OrderLine {
        OrderLine {
            category_id: category_id.into(),
            quantity,
            unit_price,
            line_total: u64::from(quantity) * unit_price,
        }
    }

    #[test]
    fn test_order_items_and_payment_share_the_order_id() {
        let mut order = Order::from_create(
            "order_1".into(),
            params(400, 400, vec![line("general", 2, 100), line("vip", 1, 200)]),
        )
        .unwrap();
        assert!(order.on_create().is_ok());
        assert!(order.items.iter().all(|item| item.order_id == "order_1"));
        assert_eq!(order.payment.order_id, "order_1");
        assert_eq!(order.payment.status, PaymentStatus::Authorized);
    }

    #[test]
    fn test_on_create_rejects_inconsistent_records() {
        let mut empty = Order::from_create("order_1".into(), params(0, 0, vec![])).unwrap();
        assert_eq!(empty.on_create(), Err(OrderStoreError::NoItems));

        let mut wrong_total =
            Order::from_create("order_2".into(), params(150, 150, vec![line("general", 2, 100)])).unwrap();
        assert_eq!(
            wrong_total.on_create(),
            Err(OrderStoreError::TotalMismatch { total: 150, items_total: Some(200) })
        );

        let mut wrong_payment =
            Order::from_create("order_3".into(), params(200, 199, vec![line("general", 2, 100)])).unwrap();
        assert_eq!(
            wrong_payment.on_create(),
            Err(OrderStoreError::PaymentMismatch { total: 200, authorized: 199 })
        );
    }
}
