use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use rescata_core::{AggregateId, UserId, parse_calendar_date};

/// Product identifier (assigned by the store).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A surplus item listed by one company.
///
/// The sellable state is not stored here: it depends on the reference time
/// and is derived with [`Product::classify`] on every read.
///
/// Missing attributes in stored documents fall back to empty / zero values,
/// and an expiration that cannot be parsed is read as "no expiration".
/// A quantity or price that is null or not a number reads as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Owning company.
    pub company_id: UserId,
    /// Company display name at the time the product was listed.
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expires_on: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: i64,
    /// Unit price; zero means free.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Decimal,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    pub fn is_owned_by(&self, company_id: UserId) -> bool {
        self.company_id == company_id
    }

    /// Apply a partial update. `updated_at` is always refreshed.
    pub fn apply_patch(&mut self, patch: &ProductPatch, at: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(expires_on) = patch.expires_on {
            self.expires_on = expires_on;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        self.updated_at = Some(at);
    }
}

/// A product about to be created; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub company_id: UserId,
    pub company_name: String,
    pub name: String,
    pub description: String,
    pub expires_on: Option<NaiveDate>,
    pub quantity: i64,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            company_id: self.company_id,
            company_name: self.company_name,
            name: self.name,
            description: self.description,
            expires_on: self.expires_on,
            quantity: self.quantity,
            price: self.price,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

/// Partial product update. `None` leaves the attribute untouched;
/// `expires_on: Some(None)` clears the expiration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub expires_on: Option<Option<NaiveDate>>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => parse_calendar_date(&raw),
        _ => None,
    })
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(raw) => raw.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(quantity.unwrap_or(0))
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(raw) => parse_decimal(raw.trim()),
        _ => None,
    };
    Ok(price.unwrap_or(Decimal::ZERO))
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    raw.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}
