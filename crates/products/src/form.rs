//! Create/edit form for products.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use rescata_core::{UserId, parse_calendar_date};
use rescata_validation::{
    DateRule, FormInput, NumericRule, RuleSet, TextRule, ValidationErrors, accept,
};

use crate::product::{NewProduct, Product, ProductPatch};

/// Form field names.
pub mod fields {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const EXPIRES_ON: &str = "expires_on";
    pub const QUANTITY: &str = "quantity";
    pub const PRICE: &str = "price";
}

/// Limits for the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRules {
    pub name_min: usize,
    pub name_max: usize,
    pub description_min: usize,
    pub description_max: usize,
    pub quantity_max: i64,
    pub price_max: i64,
}

impl Default for ProductRules {
    fn default() -> Self {
        Self {
            name_min: 3,
            name_max: 50,
            description_min: 10,
            description_max: 500,
            quantity_max: 10_000,
            price_max: 1_000_000,
        }
    }
}

impl ProductRules {
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::new()
            .text(
                fields::NAME,
                TextRule::new(
                    self.name_min,
                    self.name_max,
                    format!("name must be between {} and {} characters", self.name_min, self.name_max),
                )
                .required_message("name is required"),
            )
            .text(
                fields::DESCRIPTION,
                TextRule::new(
                    self.description_min,
                    self.description_max,
                    format!(
                        "description must be between {} and {} characters",
                        self.description_min, self.description_max
                    ),
                )
                .required_message("description is required"),
            )
            .integer(
                fields::QUANTITY,
                NumericRule::new(
                    0,
                    self.quantity_max,
                    format!("quantity must be a whole number between 0 and {}", self.quantity_max),
                ),
            )
            .decimal(
                fields::PRICE,
                NumericRule::new(
                    0,
                    self.price_max,
                    format!("price must be a number between 0 and {}", self.price_max),
                ),
            )
            .date(
                fields::EXPIRES_ON,
                DateRule::not_in_past("expiration date cannot be earlier than today"),
            )
    }
}

/// Typed product attributes taken from an accepted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub expires_on: Option<NaiveDate>,
    pub quantity: i64,
    pub price: Decimal,
}

impl ProductDraft {
    /// Run full validation, then convert the raw values.
    ///
    /// Text is stored trimmed.
    pub fn from_form(rules: &RuleSet, input: &FormInput, today: NaiveDate) -> Result<Self, ValidationErrors> {
        accept(rules, input, today)?;

        let mut errors = ValidationErrors::new();
        let quantity = input
            .trimmed(fields::QUANTITY)
            .and_then(|raw| Decimal::from_str(raw).ok())
            .and_then(|d| d.to_i64());
        let price = input
            .trimmed(fields::PRICE)
            .and_then(|raw| Decimal::from_str(raw).ok());

        if quantity.is_none() {
            errors.insert(fields::QUANTITY, "quantity must be a whole number");
        }
        if price.is_none() {
            errors.insert(fields::PRICE, "price must be a number");
        }

        match (quantity, price) {
            (Some(quantity), Some(price)) => Ok(Self {
                name: input.trimmed(fields::NAME).unwrap_or_default().to_string(),
                description: input.trimmed(fields::DESCRIPTION).unwrap_or_default().to_string(),
                expires_on: input.get(fields::EXPIRES_ON).and_then(parse_calendar_date),
                quantity,
                price,
            }),
            _ => Err(errors),
        }
    }

    /// Pre-fill an edit form from a stored product.
    pub fn form_for(product: &Product) -> FormInput {
        FormInput::new()
            .set(fields::NAME, product.name.clone())
            .set(fields::DESCRIPTION, product.description.clone())
            .set(
                fields::EXPIRES_ON,
                product.expires_on.map(|d| d.to_string()).unwrap_or_default(),
            )
            .set(fields::QUANTITY, product.quantity.to_string())
            .set(fields::PRICE, product.price.to_string())
    }

    pub fn into_new_product(
        self,
        company_id: UserId,
        company_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> NewProduct {
        NewProduct {
            company_id,
            company_name: company_name.into(),
            name: self.name,
            description: self.description,
            expires_on: self.expires_on,
            quantity: self.quantity,
            price: self.price,
            created_at,
        }
    }

    /// Edit forms submit every field, so the patch is complete.
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: Some(self.name),
            description: Some(self.description),
            expires_on: Some(self.expires_on),
            quantity: Some(self.quantity),
            price: Some(self.price),
        }
    }
}
