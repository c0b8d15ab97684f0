//! `rescata-auth`: identity boundary.
//!
//! Authentication happens elsewhere. This crate only models the identity
//! handed to the core (`currentUserId + role`) and the checks made against it.

pub mod authorize;
pub mod principal;
pub mod roles;

pub use authorize::{AuthzError, ensure_owner, require_role};
pub use principal::Principal;
pub use roles::Role;
