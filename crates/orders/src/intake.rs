use chrono::{DateTime, Utc};
use thiserror::Error;

use rescata_auth::{Principal, Role};
use rescata_products::{Product, ProductId};

use crate::order::{NewOrder, OrderRequest};

/// Client name stored on the order when the identity carries none.
pub const CLIENT_FALLBACK_NAME: &str = "Cliente";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("only clients can place orders (caller is {0})")]
    NotAClient(Role),

    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(i64),

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },
}

/// Decide whether `request` can become an order against `product`, the
/// snapshot read just before this call.
///
/// On success the returned order is `Pending`, stamped with `now`, and
/// carries the client, product and company names as of this instant.
/// Stock is only compared, never reserved: two requests racing on the same
/// snapshot can both pass.
pub fn prepare_order(
    principal: &Principal,
    request: &OrderRequest,
    product: Option<&Product>,
    now: DateTime<Utc>,
) -> Result<NewOrder, OrderError> {
    if principal.role != Role::Client {
        return Err(OrderError::NotAClient(principal.role));
    }
    if request.quantity < 1 {
        return Err(OrderError::InvalidQuantity(request.quantity));
    }

    let product = product
        .filter(|p| p.id == request.product_id)
        .ok_or(OrderError::ProductNotFound(request.product_id))?;

    if request.quantity > product.quantity {
        return Err(OrderError::InsufficientStock {
            requested: request.quantity,
            available: product.quantity.max(0),
        });
    }

    Ok(NewOrder {
        client_id: principal.user_id,
        client_name: principal.display_name_or(CLIENT_FALLBACK_NAME).to_string(),
        product_id: product.id,
        product_name: product.name.clone(),
        company_name: product.company_name.clone(),
        quantity: request.quantity,
        created_at: now,
    })
}
