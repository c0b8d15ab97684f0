use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rescata_products::{ClassifiedProduct, LifecyclePolicy, Product, ProductState};

use crate::filter::CatalogFilter;
use crate::page::{CatalogPage, PageRequest};
use crate::sort::SortSpec;

/// Everything that shapes one catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub filter: CatalogFilter,
    /// `None` keeps the store order.
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub page: PageRequest,
    /// Drop expired products before filtering (public browsing).
    #[serde(default)]
    pub hide_expired: bool,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: CatalogFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, page: i64, page_size: usize) -> Self {
        self.page = PageRequest::new(page, page_size);
        self
    }

    pub fn hide_expired(mut self) -> Self {
        self.hide_expired = true;
        self
    }

    /// Caps the page size at `max`.
    pub fn limit_page_size(mut self, max: usize) -> Self {
        self.page.page_size = self.page.page_size.min(max.max(1));
        self
    }
}

/// Filter, sort (stable) and paginate `products` as of `now`.
///
/// Each product is classified exactly once, so filter and sort see the
/// same state. Equal sort keys keep their input order.
pub fn run<'a>(
    products: &'a [Product],
    query: &CatalogQuery,
    policy: &LifecyclePolicy,
    now: DateTime<Utc>,
) -> CatalogPage<'a> {
    let mut visible: Vec<ClassifiedProduct<'a>> = products
        .iter()
        .map(|p| p.classify_with(policy, now))
        .filter(|item| !(query.hide_expired && item.state == ProductState::Expired))
        .filter(|item| query.filter.matches(item))
        .collect();

    if let Some(spec) = &query.sort {
        visible.sort_by(|a, b| spec.compare(a, b));
    }

    CatalogPage::slice(visible, &query.page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortKey;
    use chrono::{Duration, NaiveDate, TimeZone};
    use rescata_core::UserId;
    use rescata_products::{NewProduct, ProductId};
    use rust_decimal::Decimal;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 10, 30, 0).unwrap()
    }

    fn in_days(days: i64) -> Option<NaiveDate> {
        Some(test_time().date_naive() + Duration::days(days))
    }

    fn product(name: &str, quantity: i64, price: i64, expires_on: Option<NaiveDate>) -> Product {
        NewProduct {
            company_id: UserId::new(),
            company_name: "Verduras Sur".to_string(),
            name: name.to_string(),
            description: format!("{name} en buen estado"),
            expires_on,
            quantity,
            price: Decimal::from(price),
            created_at: test_time(),
        }
        .into_product(ProductId::generate())
    }

    fn names(page: &CatalogPage<'_>) -> Vec<String> {
        page.items.iter().map(|i| i.product.name.clone()).collect()
    }

    fn mixed() -> Vec<Product> {
        vec![
            product("Leche", 10, 900, in_days(2)),    // porVencer
            product("Pan", 5, 0, in_days(1)),         // gratuito
            product("Yogur", 3, 500, in_days(-1)),    // vencido
            product("Arroz", 0, 1200, None),          // agotado
            product("Fideos", 8, 700, in_days(30)),   // disponible
        ]
    }

    #[test]
    fn twenty_three_items_make_three_pages() {
        let products: Vec<Product> = (0..23)
            .map(|i| product(&format!("Producto {i:02}"), 1, 100, None))
            .collect();
        let policy = LifecyclePolicy::default();

        let first = run(&products, &CatalogQuery::new().page(1, 10), &policy, test_time());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 23);
        assert_eq!(first.items.len(), 10);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let zero = run(&products, &CatalogQuery::new().page(0, 10), &policy, test_time());
        assert_eq!(zero.page, 1);

        let beyond = run(&products, &CatalogQuery::new().page(99, 10), &policy, test_time());
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.items.len(), 3);
        assert!(!beyond.has_next());
    }

    #[test]
    fn attention_filter_keeps_expiring_and_expired() {
        let products = mixed();
        let query = CatalogQuery::new().filter(CatalogFilter::NeedsAttention);
        let page = run(&products, &query, &LifecyclePolicy::default(), test_time());
        assert_eq!(names(&page), vec!["Leche", "Yogur"]);
    }

    #[test]
    fn free_filter_goes_by_price_not_state() {
        let mut products = mixed();
        // Free and out of stock: state is agotado, still listed as free.
        products.push(product("Queso", 0, 0, None));
        let query = CatalogQuery::new().filter(CatalogFilter::Free);
        let page = run(&products, &query, &LifecyclePolicy::default(), test_time());
        assert_eq!(names(&page), vec!["Pan", "Queso"]);
    }

    #[test]
    fn state_filter_is_exact() {
        let products = mixed();
        let query = CatalogQuery::new().filter("vencido".parse().unwrap());
        let page = run(&products, &query, &LifecyclePolicy::default(), test_time());
        assert_eq!(names(&page), vec!["Yogur"]);
    }

    #[test]
    fn unknown_filter_matches_nothing() {
        let products = mixed();
        let query = CatalogQuery::new().filter("baratos".parse().unwrap());
        let page = run(&products, &query, &LifecyclePolicy::default(), test_time());
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn browsing_hides_expired() {
        let products = mixed();
        let query = CatalogQuery::new().hide_expired();
        let page = run(&products, &query, &LifecyclePolicy::default(), test_time());
        assert_eq!(page.total_items, 4);
        assert!(page.items.iter().all(|i| i.state != ProductState::Expired));
    }

    #[test]
    fn price_toggle_sorts_then_reverses() {
        let products = mixed();
        let policy = LifecyclePolicy::default();

        let asc = SortSpec::toggle(None, SortKey::Price);
        let page = run(&products, &CatalogQuery::new().sort(asc), &policy, test_time());
        assert_eq!(names(&page), vec!["Pan", "Yogur", "Fideos", "Leche", "Arroz"]);

        let desc = SortSpec::toggle(Some(asc), SortKey::Price);
        let page = run(&products, &CatalogQuery::new().sort(desc), &policy, test_time());
        assert_eq!(names(&page), vec!["Arroz", "Leche", "Fideos", "Yogur", "Pan"]);
    }

    #[test]
    fn undated_products_sort_last_by_expiration() {
        let products = mixed();
        let query = CatalogQuery::new().sort(SortSpec::ascending(SortKey::ExpiresOn));
        let page = run(&products, &query, &LifecyclePolicy::default(), test_time());
        assert_eq!(names(&page), vec!["Yogur", "Pan", "Leche", "Fideos", "Arroz"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let products = vec![
            product("B", 1, 100, None),
            product("A", 1, 100, None),
            product("C", 1, 100, None),
        ];
        let query = CatalogQuery::new().sort(SortSpec::ascending(SortKey::Price));
        let page = run(&products, &query, &LifecyclePolicy::default(), test_time());
        assert_eq!(names(&page), vec!["B", "A", "C"]);
    }

    #[test]
    fn page_size_is_capped() {
        let query = CatalogQuery::new().page(1, 500).limit_page_size(100);
        assert_eq!(query.page.page_size, 100);
        let query = CatalogQuery::new().page(1, 5).limit_page_size(100);
        assert_eq!(query.page.page_size, 5);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_product() -> impl Strategy<Value = Product> {
            ("[a-z]{3,8}", 0i64..20, 0i64..3000, proptest::option::of(-10i64..40))
                .prop_map(|(name, qty, price, days)| product(&name, qty, price, days.and_then(in_days)))
        }

        fn arb_key() -> impl Strategy<Value = SortKey> {
            prop_oneof![
                Just(SortKey::Name),
                Just(SortKey::Description),
                Just(SortKey::Price),
                Just(SortKey::Quantity),
                Just(SortKey::ExpiresOn),
                Just(SortKey::State),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig { cases: 500, ..ProptestConfig::default() })]

            #[test]
            fn same_input_same_page(
                products in proptest::collection::vec(arb_product(), 0..40),
                key in arb_key(),
                page in -2i64..8,
                size in 0usize..12,
            ) {
                let query = CatalogQuery::new().sort(SortSpec::ascending(key)).page(page, size);
                let policy = LifecyclePolicy::default();
                let a = run(&products, &query, &policy, test_time());
                let b = run(&products, &query, &policy, test_time());
                prop_assert_eq!(a, b);
            }

            #[test]
            fn page_stays_in_bounds(
                products in proptest::collection::vec(arb_product(), 0..40),
                page in -5i64..20,
                size in 0usize..12,
            ) {
                let query = CatalogQuery::new().page(page, size);
                let result = run(&products, &query, &LifecyclePolicy::default(), test_time());
                prop_assert!(result.page >= 1);
                prop_assert!(result.page <= result.total_pages.max(1));
                prop_assert!(result.items.len() <= result.page_size);
                prop_assert_eq!(result.total_items, products.len());
            }

            #[test]
            fn sorting_preserves_the_filtered_set(
                products in proptest::collection::vec(arb_product(), 0..30),
                key in arb_key(),
            ) {
                let policy = LifecyclePolicy::default();
                let unsorted = run(&products, &CatalogQuery::new().page(1, 100), &policy, test_time());
                let sorted = run(
                    &products,
                    &CatalogQuery::new().sort(SortSpec::descending(key)).page(1, 100),
                    &policy,
                    test_time(),
                );
                let mut a: Vec<ProductId> = unsorted.items.iter().map(|i| i.product.id).collect();
                let mut b: Vec<ProductId> = sorted.items.iter().map(|i| i.product.id).collect();
                a.sort();
                b.sort();
                prop_assert_eq!(a, b);
            }
        }
    }
}
