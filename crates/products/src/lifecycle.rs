//! Lifecycle classifier.
//!
//! Derives a product's sellable state from stock, price and expiration,
//! relative to a reference instant supplied by the caller. Rules are checked
//! in a fixed order and the first match wins:
//!
//! 1. no stock            → `agotado`
//! 2. zero price          → `gratuito`
//! 3. no expiration       → `disponible`
//! 4. expired (≤ 0 days)  → `vencido`
//! 5. within the window   → `porVencer`
//! 6. otherwise           → `disponible`

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Days before expiration at which a product counts as expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Derived sellable state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductState {
    #[serde(rename = "agotado")]
    OutOfStock,
    #[serde(rename = "gratuito")]
    Free,
    #[serde(rename = "porVencer")]
    ExpiringSoon,
    #[serde(rename = "vencido")]
    Expired,
    #[serde(rename = "disponible")]
    Available,
}

impl ProductState {
    pub const ALL: [ProductState; 5] = [
        ProductState::OutOfStock,
        ProductState::Free,
        ProductState::ExpiringSoon,
        ProductState::Expired,
        ProductState::Available,
    ];

    /// Wire value, as stored on product documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductState::OutOfStock => "agotado",
            ProductState::Free => "gratuito",
            ProductState::ExpiringSoon => "porVencer",
            ProductState::Expired => "vencido",
            ProductState::Available => "disponible",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == s)
    }

    /// Whether buyers should be warned about (or not offered) the item.
    pub fn needs_attention(&self) -> bool {
        matches!(self, ProductState::ExpiringSoon | ProductState::Expired)
    }
}

impl core::fmt::Display for ProductState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecyclePolicy {
    pub expiring_soon_days: i64,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            expiring_soon_days: EXPIRING_SOON_DAYS,
        }
    }
}

impl LifecyclePolicy {
    pub fn new(expiring_soon_days: i64) -> Self {
        Self { expiring_soon_days }
    }

    pub fn classify(
        &self,
        quantity: i64,
        price: Decimal,
        expires_on: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> ProductState {
        if quantity <= 0 {
            return ProductState::OutOfStock;
        }
        if price.is_zero() {
            return ProductState::Free;
        }
        let Some(days) = days_until_expiry(expires_on, now) else {
            return ProductState::Available;
        };
        if days <= 0 {
            ProductState::Expired
        } else if days <= self.expiring_soon_days {
            ProductState::ExpiringSoon
        } else {
            ProductState::Available
        }
    }

    pub fn classify_product(&self, product: &Product, now: DateTime<Utc>) -> ProductState {
        self.classify(product.quantity, product.price, product.expires_on, now)
    }

    /// Days left when the product expires within the window but has not
    /// expired yet. Used to warn a company right after saving a listing.
    pub fn expiry_warning(&self, expires_on: Option<NaiveDate>, now: DateTime<Utc>) -> Option<i64> {
        days_until_expiry(expires_on, now).filter(|days| *days > 0 && *days <= self.expiring_soon_days)
    }
}

/// Classify with the default window.
pub fn classify(
    quantity: i64,
    price: Decimal,
    expires_on: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> ProductState {
    LifecyclePolicy::default().classify(quantity, price, expires_on, now)
}

/// Whole days from `now` until the start (UTC midnight) of the expiration
/// date, rounded up. `None` when there is no expiration.
pub fn days_until_expiry(expires_on: Option<NaiveDate>, now: DateTime<Utc>) -> Option<i64> {
    let expires_at = expires_on?.and_hms_opt(0, 0, 0)?.and_utc();
    let millis = (expires_at - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    Some(if millis.rem_euclid(MILLIS_PER_DAY) == 0 { days } else { days + 1 })
}

/// A product paired with the state derived at one reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifiedProduct<'a> {
    pub product: &'a Product,
    pub state: ProductState,
}

impl Product {
    pub fn classify(&self, now: DateTime<Utc>) -> ClassifiedProduct<'_> {
        self.classify_with(&LifecyclePolicy::default(), now)
    }

    pub fn classify_with(&self, policy: &LifecyclePolicy, now: DateTime<Utc>) -> ClassifiedProduct<'_> {
        ClassifiedProduct {
            product: self,
            state: policy.classify_product(self, now),
        }
    }
}
