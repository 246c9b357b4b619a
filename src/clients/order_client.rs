use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderCreate};
use crate::orders::OrderStoreError;

/// Client for the order store.
///
/// `commit` is one actor message: the order, its items and its payment are
/// stored together or not at all.
#[derive(Clone)]
pub struct OrderStore {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderStore, Order, OrderStoreError, order, orders);

impl OrderStore {
    #[instrument(skip(self, params), fields(user_id = %params.user_id, total = params.total))]
    pub async fn commit(&self, params: OrderCreate) -> Result<Order, OrderStoreError> {
        debug!("Sending request");
        let order = self.inner.create(params).await?;
        info!(order_id = %order.id, "Order committed");
        Ok(order)
    }

    /// Orders placed by `user_id`, oldest first.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: String) -> Result<Vec<Order>, OrderStoreError> {
        debug!("Sending request");
        let mut orders: Vec<Order> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }
}
