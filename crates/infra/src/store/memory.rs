use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

use rescata_core::UserId;
use rescata_orders::{NewOrder, Order, OrderId};
use rescata_parties::{ClientProfile, CompanyProfile};
use rescata_products::{NewProduct, Product, ProductId, ProductPatch, ProductState};

use super::{AccountDirectory, OrderStore, ProductStore, StoreError};

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

/// Stored product document: the record plus the state computed when it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProductRecord {
    product: Product,
    state: ProductState,
}

/// In-memory product store for tests/dev. Lists come back in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Vec<ProductRecord>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product as-is (import, fixtures).
    pub fn insert(&self, product: Product, state: ProductState) -> Result<(), StoreError> {
        let mut records = self.inner.write().map_err(poisoned)?;
        records.retain(|r| r.product.id != product.id);
        records.push(ProductRecord { product, state });
        Ok(())
    }

    /// State recorded with the last write, not the current classification.
    pub fn recorded_state(&self, id: ProductId) -> Option<ProductState> {
        let records = self.inner.read().ok()?;
        records.iter().find(|r| r.product.id == id).map(|r| r.state)
    }
}

impl ProductStore for InMemoryProductStore {
    fn list_by_owner(&self, company_id: UserId) -> Result<Vec<Product>, StoreError> {
        let records = self.inner.read().map_err(poisoned)?;
        Ok(records
            .iter()
            .filter(|r| r.product.is_owned_by(company_id))
            .map(|r| r.product.clone())
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let records = self.inner.read().map_err(poisoned)?;
        Ok(records.iter().map(|r| r.product.clone()).collect())
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let records = self.inner.read().map_err(poisoned)?;
        Ok(records.iter().find(|r| r.product.id == id).map(|r| r.product.clone()))
    }

    fn create(&self, product: NewProduct, state: ProductState) -> Result<Product, StoreError> {
        let product = product.into_product(ProductId::generate());
        let mut records = self.inner.write().map_err(poisoned)?;
        records.push(ProductRecord {
            product: product.clone(),
            state,
        });
        Ok(product)
    }

    fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
        state: ProductState,
        at: DateTime<Utc>,
    ) -> Result<Product, StoreError> {
        let mut records = self.inner.write().map_err(poisoned)?;
        let record = records
            .iter_mut()
            .find(|r| r.product.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("product {id}")))?;
        record.product.apply_patch(patch, at);
        record.state = state;
        Ok(record.product.clone())
    }

    fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut records = self.inner.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|r| r.product.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(format!("product {id}")));
        }
        Ok(())
    }
}

/// In-memory order store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|orders| orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        let order = order.into_order(OrderId::generate());
        self.inner.write().map_err(poisoned)?.push(order.clone());
        Ok(order)
    }

    fn list_by_client(&self, client_id: UserId) -> Result<Vec<Order>, StoreError> {
        let orders = self.inner.read().map_err(poisoned)?;
        Ok(orders.iter().filter(|o| o.is_placed_by(client_id)).cloned().collect())
    }
}

/// In-memory account profiles for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    companies: RwLock<HashMap<UserId, CompanyProfile>>,
    clients: RwLock<HashMap<UserId, ClientProfile>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn company_profile(&self, company_id: UserId) -> Result<Option<CompanyProfile>, StoreError> {
        let map = self.companies.read().map_err(poisoned)?;
        Ok(map.get(&company_id).cloned())
    }

    fn save_company_profile(&self, profile: CompanyProfile) -> Result<(), StoreError> {
        let mut map = self.companies.write().map_err(poisoned)?;
        map.insert(profile.company_id, profile);
        Ok(())
    }

    fn client_profile(&self, client_id: UserId) -> Result<Option<ClientProfile>, StoreError> {
        let map = self.clients.read().map_err(poisoned)?;
        Ok(map.get(&client_id).cloned())
    }

    fn save_client_profile(&self, profile: ClientProfile) -> Result<(), StoreError> {
        let mut map = self.clients.write().map_err(poisoned)?;
        map.insert(profile.client_id, profile);
        Ok(())
    }
}
