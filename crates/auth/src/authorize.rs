use thiserror::Error;

use rescata_core::UserId;

use crate::{Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{actual}' cannot perform this action (requires '{required}')")]
    WrongRole { required: Role, actual: Role },

    #[error("forbidden: record is owned by another account")]
    NotOwner,
}

/// Require the principal to act in a specific role.
///
/// - No IO
/// - No panics
pub fn require_role(principal: &Principal, required: Role) -> Result<(), AuthzError> {
    if principal.role == required {
        Ok(())
    } else {
        Err(AuthzError::WrongRole {
            required,
            actual: principal.role,
        })
    }
}

/// Require the principal to be the owner of a record.
pub fn ensure_owner(principal: &Principal, owner: UserId) -> Result<(), AuthzError> {
    if principal.user_id == owner {
        Ok(())
    } else {
        Err(AuthzError::NotOwner)
    }
}
