//! Products domain module.
//!
//! Product records, the lifecycle classifier that derives a product's sellable
//! state, and the create/edit form rules. Pure domain logic (no IO).

pub mod form;
pub mod lifecycle;
pub mod product;

pub use form::{ProductDraft, ProductRules, fields};
pub use lifecycle::{
    ClassifiedProduct, EXPIRING_SOON_DAYS, LifecyclePolicy, ProductState, classify, days_until_expiry,
};
pub use product::{NewProduct, Product, ProductId, ProductPatch};
