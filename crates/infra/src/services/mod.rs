//! Application services.
//!
//! Each service validates the caller's identity, runs the pure domain
//! decision and then issues the store writes. Errors from every layer are
//! folded into [`ServiceError`].

use thiserror::Error;

use rescata_auth::AuthzError;
use rescata_core::DomainError;
use rescata_orders::OrderError;
use rescata_validation::ValidationErrors;

use crate::store::StoreError;

pub mod orders;
pub mod products;
pub mod profiles;

pub use orders::OrderIntakeService;
pub use products::{Listing, ProductService, ProductView};
pub use profiles::ProfileService;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more form fields failed; carries the field → message map.
    #[error(transparent)]
    ValidationFailed(ValidationErrors),

    /// Wrong role or not the owner.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },

    /// Rejected order request other than stock.
    #[error(transparent)]
    Order(OrderError),

    #[error("conflict: {0}")]
    Conflict(String),

    /// An identifier supplied by the caller could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Store(StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ValidationErrors> for ServiceError {
    fn from(value: ValidationErrors) -> Self {
        ServiceError::ValidationFailed(value)
    }
}

impl From<AuthzError> for ServiceError {
    fn from(value: AuthzError) -> Self {
        ServiceError::Forbidden(value.to_string())
    }
}

impl From<OrderError> for ServiceError {
    fn from(value: OrderError) -> Self {
        match value {
            OrderError::InsufficientStock { requested, available } => {
                ServiceError::InsufficientStock { requested, available }
            }
            OrderError::ProductNotFound(id) => ServiceError::NotFound(format!("product {id}")),
            OrderError::NotAClient(_) => ServiceError::Forbidden(value.to_string()),
            OrderError::InvalidQuantity(_) => ServiceError::Order(value),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(what) => ServiceError::NotFound(what),
            StoreError::Unavailable(_) => ServiceError::Store(value),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::InvalidId(msg) => ServiceError::InvalidId(msg),
            DomainError::Conflict(msg) => ServiceError::Conflict(msg),
        }
    }
}
