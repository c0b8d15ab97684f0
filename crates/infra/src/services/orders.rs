use std::sync::Arc;

use chrono::{DateTime, Utc};

use rescata_auth::{Principal, Role, require_role};
use rescata_orders::{Order, OrderRequest, prepare_order};

use crate::store::{OrderStore, ProductStore};

use super::ServiceResult;

/// Turns client requests into pending orders.
///
/// One product read, then at most one order write. Nothing is locked in
/// between, so concurrent requests against the same product can each pass
/// the stock check; stock is never decremented here.
pub struct OrderIntakeService {
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
}

impl OrderIntakeService {
    pub fn new(products: Arc<dyn ProductStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { products, orders }
    }

    pub fn place_order(&self, principal: &Principal, request: OrderRequest, now: DateTime<Utc>) -> ServiceResult<Order> {
        require_role(principal, Role::Client)?;
        let product = self.products.get(request.product_id)?;

        let new_order = match prepare_order(principal, &request, product.as_ref(), now) {
            Ok(order) => order,
            Err(err) => {
                tracing::warn!(
                    "Order from client {} for product {} rejected: {}",
                    principal.user_id,
                    request.product_id,
                    err
                );
                return Err(err.into());
            }
        };

        let order = self.orders.create(new_order)?;
        tracing::info!(
            "Placed order {} for client {} ({} x {})",
            order.id,
            order.client_id,
            order.quantity,
            order.product_id
        );
        Ok(order)
    }

    pub fn orders_for_client(&self, principal: &Principal) -> ServiceResult<Vec<Order>> {
        require_role(principal, Role::Client)?;
        Ok(self.orders.list_by_client(principal.user_id)?)
    }
}
