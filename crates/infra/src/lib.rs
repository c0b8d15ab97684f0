//! Infrastructure layer: store collaborators, configuration, application services.

pub mod config;
pub mod services;
pub mod store;

pub use config::{CatalogConfig, ConfigError, LoadOptions, MarketplaceConfig};
pub use services::{
    Listing, OrderIntakeService, ProductService, ProductView, ProfileService, ServiceError, ServiceResult,
};
pub use store::{
    AccountDirectory, InMemoryAccountDirectory, InMemoryOrderStore, InMemoryProductStore, OrderStore,
    ProductStore, StoreError,
};
