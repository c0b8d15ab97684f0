pub mod catalog;
pub mod classify;
pub mod validate;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use rescata_core::{Now, SystemClock};
use rescata_products::Product;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn ok(output: String) -> Self {
        Self { exit_code: 0, output }
    }
}

/// Parse `--now`, or read the system clock.
pub fn reference_time(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|t| t.with_timezone(&Utc))
            .with_context(|| format!("`{raw}` is not an RFC 3339 timestamp")),
        None => Ok(SystemClock.now()),
    }
}

pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    let raw = fs::read_to_string(path).with_context(|| format!("could not read `{}`", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("`{}` is not a JSON array of products", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_reference_time() {
        let t = reference_time(Some("2026-10-19T10:30:00-03:00")).unwrap();
        assert_eq!(t.to_rfc3339(), "2026-10-19T13:30:00+00:00");
        assert!(reference_time(Some("ayer")).is_err());
    }

    #[test]
    fn loads_products_with_lenient_dates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"0190a5e0-0000-7000-8000-000000000001","company_id":"0190a5e0-0000-7000-8000-000000000002","name":"Leche","expires_on":"no sé","quantity":2,"price":"990"}}]"#
        )
        .unwrap();
        let products = load_products(file.path()).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].expires_on, None);
    }

    #[test]
    fn one_malformed_document_does_not_abort_the_listing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"0190a5e0-0000-7000-8000-000000000001","company_id":"0190a5e0-0000-7000-8000-000000000002","name":"Queso","expires_on":20261022,"quantity":null,"price":null}},{{"id":"0190a5e0-0000-7000-8000-000000000003","company_id":"0190a5e0-0000-7000-8000-000000000002","name":"Yogur","expires_on":"2026-10-22","quantity":4,"price":1200}}]"#
        )
        .unwrap();
        let products = load_products(file.path()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].expires_on, None);
        assert_eq!(products[0].quantity, 0);
        assert!(products[0].is_free());
        assert_eq!(products[1].quantity, 4);
        assert_eq!(products[1].price, rust_decimal::Decimal::new(1200, 0));
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = load_products(Path::new("/nonexistent/products.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/products.json"));
    }
}
