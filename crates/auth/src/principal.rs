use serde::{Deserialize, Serialize};

use rescata_core::UserId;

use crate::Role;

/// The identity a request acts as.
///
/// Supplied by the identity collaborator and trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    /// Display name from the account profile, if it has one.
    pub display_name: Option<String>,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Display name with blank values treated as missing.
    pub fn display_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => fallback,
        }
    }

    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }
}
