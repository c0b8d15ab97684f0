use std::sync::Arc;

use chrono::{DateTime, Utc};

use rescata_auth::{Principal, Role, require_role};
use rescata_core::{DomainError, UserId};
use rescata_parties::{ClientProfile, ClientRegistration, CompanyProfile};
use rescata_validation::FormInput;

use crate::store::AccountDirectory;

use super::ServiceResult;

/// Account profile maintenance.
pub struct ProfileService {
    accounts: Arc<dyn AccountDirectory>,
}

impl ProfileService {
    pub fn new(accounts: Arc<dyn AccountDirectory>) -> Self {
        Self { accounts }
    }

    pub fn company_profile(&self, principal: &Principal) -> ServiceResult<Option<CompanyProfile>> {
        require_role(principal, Role::Company)?;
        Ok(self.accounts.company_profile(principal.user_id)?)
    }

    /// Replace the company's profile. Products listed earlier keep the old name.
    pub fn update_company_profile(
        &self,
        principal: &Principal,
        form: &FormInput,
        now: DateTime<Utc>,
    ) -> ServiceResult<CompanyProfile> {
        require_role(principal, Role::Company)?;
        let profile = CompanyProfile::from_form(principal.user_id, form, now.date_naive())?;
        self.accounts.save_company_profile(profile.clone())?;
        tracing::info!("Updated company profile {}", principal.user_id);
        Ok(profile)
    }

    /// Administrators create client accounts.
    ///
    /// Only the profile is stored. The returned initial password must be
    /// provisioned with the identity collaborator by the caller.
    pub fn register_client(
        &self,
        principal: &Principal,
        client_id: UserId,
        form: &FormInput,
        now: DateTime<Utc>,
    ) -> ServiceResult<ClientRegistration> {
        require_role(principal, Role::Admin)?;
        if self.accounts.client_profile(client_id)?.is_some() {
            return Err(DomainError::conflict(format!("client {client_id} is already registered")).into());
        }
        let registration = ClientProfile::from_registration(client_id, form, now.date_naive())?;
        self.accounts.save_client_profile(registration.profile.clone())?;
        tracing::info!("Registered client {} by admin {}", client_id, principal.user_id);
        Ok(registration)
    }

    pub fn update_client_profile(
        &self,
        principal: &Principal,
        form: &FormInput,
        now: DateTime<Utc>,
    ) -> ServiceResult<ClientProfile> {
        require_role(principal, Role::Client)?;
        let profile = ClientProfile::from_form(principal.user_id, form, now.date_naive())?;
        self.accounts.save_client_profile(profile.clone())?;
        tracing::info!("Updated client profile {}", principal.user_id);
        Ok(profile)
    }
}
