use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use rescata_infra::MarketplaceConfig;
use rescata_products::{LifecyclePolicy, Product, ProductId, ProductState, days_until_expiry};

use super::{CommandResult, load_products, reference_time};

#[derive(Debug, Serialize)]
pub struct ClassifiedRow {
    pub id: ProductId,
    pub name: String,
    pub state: ProductState,
    pub days_until_expiry: Option<i64>,
    pub expiry_warning: Option<i64>,
}

pub fn rows(products: &[Product], policy: &LifecyclePolicy, now: DateTime<Utc>) -> Vec<ClassifiedRow> {
    products
        .iter()
        .map(|p| ClassifiedRow {
            id: p.id,
            name: p.name.clone(),
            state: policy.classify_product(p, now),
            days_until_expiry: days_until_expiry(p.expires_on, now),
            expiry_warning: policy.expiry_warning(p.expires_on, now),
        })
        .collect()
}

pub fn run(config: &MarketplaceConfig, file: &Path, now: Option<&str>) -> Result<CommandResult> {
    let now = reference_time(now)?;
    let products = load_products(file)?;
    tracing::debug!("classifying {} products at {}", products.len(), now);
    let output = serde_json::to_string_pretty(&rows(&products, &config.lifecycle, now))?;
    Ok(CommandResult::ok(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rescata_core::UserId;
    use rescata_products::NewProduct;
    use rust_decimal::Decimal;

    #[test]
    fn rows_carry_state_and_warning() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 10, 30, 0).unwrap();
        let product = NewProduct {
            company_id: UserId::new(),
            company_name: "Feria".to_string(),
            name: "Leche".to_string(),
            description: "Leche entera".to_string(),
            expires_on: Some(now.date_naive() + Duration::days(2)),
            quantity: 4,
            price: Decimal::from(990),
            created_at: now,
        }
        .into_product(ProductId::generate());

        let rows = rows(&[product], &LifecyclePolicy::default(), now);
        assert_eq!(rows[0].state, ProductState::ExpiringSoon);
        assert_eq!(rows[0].days_until_expiry, Some(2));
        assert_eq!(rows[0].expiry_warning, Some(2));
    }
}
