//! Store collaborator contracts.
//!
//! The core never talks to a database directly. Services read and write
//! through these traits; the in-memory implementations back tests and the CLI.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use rescata_core::UserId;
use rescata_orders::{NewOrder, Order};
use rescata_parties::{ClientProfile, CompanyProfile};
use rescata_products::{NewProduct, Product, ProductId, ProductPatch, ProductState};

pub mod memory;

pub use memory::{InMemoryAccountDirectory, InMemoryOrderStore, InMemoryProductStore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Product records.
///
/// Writes carry the state classified at write time so the stored document
/// mirrors what the company saw when saving. Readers always reclassify.
pub trait ProductStore: Send + Sync {
    fn list_by_owner(&self, company_id: UserId) -> Result<Vec<Product>, StoreError>;
    fn list_all(&self) -> Result<Vec<Product>, StoreError>;
    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;
    /// Assigns the id.
    fn create(&self, product: NewProduct, state: ProductState) -> Result<Product, StoreError>;
    fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
        state: ProductState,
        at: DateTime<Utc>,
    ) -> Result<Product, StoreError>;
    fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}

/// Order records. Orders are append-only from the client side.
pub trait OrderStore: Send + Sync {
    /// Assigns the id.
    fn create(&self, order: NewOrder) -> Result<Order, StoreError>;
    fn list_by_client(&self, client_id: UserId) -> Result<Vec<Order>, StoreError>;
}

/// Account profiles.
pub trait AccountDirectory: Send + Sync {
    fn company_profile(&self, company_id: UserId) -> Result<Option<CompanyProfile>, StoreError>;
    fn save_company_profile(&self, profile: CompanyProfile) -> Result<(), StoreError>;
    fn client_profile(&self, client_id: UserId) -> Result<Option<ClientProfile>, StoreError>;
    fn save_client_profile(&self, profile: ClientProfile) -> Result<(), StoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn list_by_owner(&self, company_id: UserId) -> Result<Vec<Product>, StoreError> {
        (**self).list_by_owner(company_id)
    }

    fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_all()
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id)
    }

    fn create(&self, product: NewProduct, state: ProductState) -> Result<Product, StoreError> {
        (**self).create(product, state)
    }

    fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
        state: ProductState,
        at: DateTime<Utc>,
    ) -> Result<Product, StoreError> {
        (**self).update(id, patch, state, at)
    }

    fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        (**self).create(order)
    }

    fn list_by_client(&self, client_id: UserId) -> Result<Vec<Order>, StoreError> {
        (**self).list_by_client(client_id)
    }
}

impl<S> AccountDirectory for Arc<S>
where
    S: AccountDirectory + ?Sized,
{
    fn company_profile(&self, company_id: UserId) -> Result<Option<CompanyProfile>, StoreError> {
        (**self).company_profile(company_id)
    }

    fn save_company_profile(&self, profile: CompanyProfile) -> Result<(), StoreError> {
        (**self).save_company_profile(profile)
    }

    fn client_profile(&self, client_id: UserId) -> Result<Option<ClientProfile>, StoreError> {
        (**self).client_profile(client_id)
    }

    fn save_client_profile(&self, profile: ClientProfile) -> Result<(), StoreError> {
        (**self).save_client_profile(profile)
    }
}
