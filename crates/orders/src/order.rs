use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rescata_core::{AggregateId, UserId};
use rescata_products::ProductId;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order status lifecycle. Orders are always created `Pending`; the other
/// transitions belong to the company side and are not modelled here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "aprobado")]
    Approved,
    #[serde(rename = "rechazado")]
    Rejected,
    #[serde(rename = "entregado")]
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pendiente",
            OrderStatus::Approved => "aprobado",
            OrderStatus::Rejected => "rechazado",
            OrderStatus::Delivered => "entregado",
        }
    }

    /// Display label for status badges.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Approved => "Aprobado",
            OrderStatus::Rejected => "Rechazado",
            OrderStatus::Delivered => "Entregado",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a client asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// A persisted order.
///
/// Client, product and company names are copies taken when the order was
/// placed; later renames do not reach existing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub client_id: UserId,
    #[serde(default)]
    pub client_name: String,
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub company_name: String,
    pub quantity: i64,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn is_placed_by(&self, client_id: UserId) -> bool {
        self.client_id == client_id
    }
}

/// An accepted order not yet written; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub client_id: UserId,
    pub client_name: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub company_name: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            client_id: self.client_id,
            client_name: self.client_name,
            product_id: self.product_id,
            product_name: self.product_name,
            company_name: self.company_name,
            quantity: self.quantity,
            status: OrderStatus::Pending,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values_and_labels() {
        let json = serde_json::to_string(&OrderStatus::Rejected).unwrap();
        assert_eq!(json, "\"rechazado\"");
        let parsed: OrderStatus = serde_json::from_str("\"entregado\"").unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
        assert_eq!(parsed.label(), "Entregado");
        assert_eq!(OrderStatus::default().label(), "Pendiente");
    }

    #[test]
    fn stored_order_without_status_reads_as_pending() {
        let json = serde_json::json!({
            "id": OrderId::generate(),
            "client_id": UserId::new(),
            "product_id": ProductId::generate(),
            "quantity": 2,
            "created_at": "2026-10-19T10:30:00Z",
        });
        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.product_name, "");
    }
}
