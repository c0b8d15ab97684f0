use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use rescata_auth::{Principal, Role, ensure_owner, require_role};
use rescata_catalog::{CatalogPage, CatalogQuery, run};
use rescata_products::{LifecyclePolicy, Product, ProductDraft, ProductId, ProductState};
use rescata_validation::{FormInput, FormState, RuleSet};

use crate::config::{CatalogConfig, MarketplaceConfig};
use crate::store::{AccountDirectory, ProductStore};

use super::{ServiceError, ServiceResult};

/// Company name snapshotted onto a product when the company has no profile
/// and the identity carries no display name.
pub const COMPANY_FALLBACK_NAME: &str = "Empresa";

/// A product as shown to its reader, classified at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductView {
    pub product: Product,
    pub state: ProductState,
    /// Days left when the product is about to expire.
    pub expiry_warning: Option<i64>,
}

impl ProductView {
    fn new(product: Product, policy: &LifecyclePolicy, now: DateTime<Utc>) -> Self {
        let state = policy.classify_product(&product, now);
        let expiry_warning = policy.expiry_warning(product.expires_on, now);
        Self {
            product,
            state,
            expiry_warning,
        }
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub items: Vec<ProductView>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl Listing {
    fn from_page(page: CatalogPage<'_>, policy: &LifecyclePolicy, now: DateTime<Utc>) -> Self {
        Self {
            items: page
                .items
                .iter()
                .map(|item| ProductView {
                    product: item.product.clone(),
                    state: item.state,
                    expiry_warning: policy.expiry_warning(item.product.expires_on, now),
                })
                .collect(),
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

/// Product management for companies and catalog browsing for clients.
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    accounts: Arc<dyn AccountDirectory>,
    rules: RuleSet,
    policy: LifecyclePolicy,
    catalog: CatalogConfig,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductStore>,
        accounts: Arc<dyn AccountDirectory>,
        config: &MarketplaceConfig,
    ) -> Self {
        Self {
            products,
            accounts,
            rules: config.rules.rule_set(),
            policy: config.lifecycle,
            catalog: config.catalog,
        }
    }

    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    /// Empty create form with live validation.
    pub fn new_form(&self) -> FormState {
        FormState::new(self.rules.clone())
    }

    /// Edit form pre-filled from the stored product.
    pub fn edit_form(&self, principal: &Principal, id: ProductId) -> ServiceResult<FormState> {
        let product = self.owned_product(principal, id)?;
        Ok(FormState::with_input(self.rules.clone(), ProductDraft::form_for(&product)))
    }

    /// First page, all products, store order, configured page size.
    pub fn query(&self) -> CatalogQuery {
        CatalogQuery::new().page(1, self.catalog.default_page_size)
    }

    pub fn create(&self, principal: &Principal, form: &FormInput, now: DateTime<Utc>) -> ServiceResult<ProductView> {
        require_role(principal, Role::Company)?;
        let draft = self.accept(form, now)?;

        let company_name = self.company_name(principal)?;
        let state = self
            .policy
            .classify(draft.quantity, draft.price, draft.expires_on, now);
        let product = self
            .products
            .create(draft.into_new_product(principal.user_id, company_name, now), state)?;

        tracing::info!(
            "Created product {} for company {} (state: {})",
            product.id,
            principal.user_id,
            state
        );
        Ok(ProductView::new(product, &self.policy, now))
    }

    pub fn update(
        &self,
        principal: &Principal,
        id: ProductId,
        form: &FormInput,
        now: DateTime<Utc>,
    ) -> ServiceResult<ProductView> {
        self.owned_product(principal, id)?;
        let draft = self.accept(form, now)?;

        let state = self
            .policy
            .classify(draft.quantity, draft.price, draft.expires_on, now);
        let product = self.products.update(id, &draft.into_patch(), state, now)?;

        tracing::info!("Updated product {} (state: {})", id, state);
        Ok(ProductView::new(product, &self.policy, now))
    }

    pub fn delete(&self, principal: &Principal, id: ProductId) -> ServiceResult<()> {
        self.owned_product(principal, id)?;
        self.products.delete(id)?;
        tracing::info!("Deleted product {} for company {}", id, principal.user_id);
        Ok(())
    }

    /// The company's own products through the catalog query engine.
    pub fn catalog(&self, principal: &Principal, query: CatalogQuery, now: DateTime<Utc>) -> ServiceResult<Listing> {
        require_role(principal, Role::Company)?;
        let products = self.products.list_by_owner(principal.user_id)?;
        Ok(self.list(&products, query, now))
    }

    /// Client-facing listing across all companies. Expired products are hidden.
    pub fn browse(&self, query: CatalogQuery, now: DateTime<Utc>) -> ServiceResult<Listing> {
        let products = self.products.list_all()?;
        Ok(self.list(&products, query.hide_expired(), now))
    }

    fn list(&self, products: &[Product], query: CatalogQuery, now: DateTime<Utc>) -> Listing {
        let query = query.limit_page_size(self.catalog.max_page_size);
        let page = run(products, &query, &self.policy, now);
        tracing::debug!(
            "Catalog query {:?}: {} of {} items on page {}/{}",
            query.filter,
            page.items.len(),
            page.total_items,
            page.page,
            page.total_pages
        );
        Listing::from_page(page, &self.policy, now)
    }

    fn accept(&self, form: &FormInput, now: DateTime<Utc>) -> ServiceResult<ProductDraft> {
        ProductDraft::from_form(&self.rules, form, now.date_naive()).map_err(|errors| {
            tracing::warn!("Product form rejected: {}", errors);
            ServiceError::from(errors)
        })
    }

    fn owned_product(&self, principal: &Principal, id: ProductId) -> ServiceResult<Product> {
        require_role(principal, Role::Company)?;
        let product = self
            .products
            .get(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("product {id}")))?;
        ensure_owner(principal, product.company_id)?;
        Ok(product)
    }

    /// Profile name first, then the identity's display name.
    fn company_name(&self, principal: &Principal) -> ServiceResult<String> {
        let profile_name = self
            .accounts
            .company_profile(principal.user_id)?
            .map(|profile| profile.name)
            .filter(|name| !name.trim().is_empty());
        Ok(profile_name.unwrap_or_else(|| principal.display_name_or(COMPANY_FALLBACK_NAME).to_string()))
    }
}
