use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rescata_core::UserId;
use rescata_validation::{FormInput, RuleSet, TextRule, ValidationErrors, accept};

/// Form field names.
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const ADDRESS: &str = "address";
    pub const COMMUNE: &str = "commune";
    pub const PHONE: &str = "phone";
    pub const PASSWORD: &str = "password";
}

/// Address and phone shared by both account kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub address: Option<String>,
    pub commune: Option<String>,
    pub phone: Option<String>,
}

impl ContactInfo {
    fn from_form(input: &FormInput) -> Self {
        Self {
            address: input.trimmed(fields::ADDRESS).map(str::to_string),
            commune: input.trimmed(fields::COMMUNE).map(str::to_string),
            phone: input.trimmed(fields::PHONE).map(str::to_string),
        }
    }
}

/// Company account profile. Its name is what buyers see on listings and orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub company_id: UserId,
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
}

/// Client account profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub client_id: UserId,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
}

fn phone_rule() -> TextRule {
    TextRule::new(8, 20, "phone must be between 8 and 20 characters").optional()
}

/// Company profile: name, address and commune are required.
pub fn company_profile_rules() -> RuleSet {
    RuleSet::new()
        .text(
            fields::NAME,
            TextRule::new(1, 100, "name must be at most 100 characters").required_message("name is required"),
        )
        .text(
            fields::ADDRESS,
            TextRule::new(1, 200, "address must be at most 200 characters")
                .required_message("address is required"),
        )
        .text(
            fields::COMMUNE,
            TextRule::new(1, 100, "commune must be at most 100 characters")
                .required_message("commune is required"),
        )
        .text(fields::PHONE, phone_rule())
}

/// Client profile: name and e-mail are required, contact details are optional.
pub fn client_profile_rules() -> RuleSet {
    RuleSet::new()
        .text(
            fields::NAME,
            TextRule::new(1, 100, "name must be at most 100 characters").required_message("name is required"),
        )
        .text(
            fields::EMAIL,
            TextRule::new(3, 254, "email must be between 3 and 254 characters")
                .required_message("email is required"),
        )
        .text(
            fields::ADDRESS,
            TextRule::new(1, 200, "address must be at most 200 characters").optional(),
        )
        .text(
            fields::COMMUNE,
            TextRule::new(1, 100, "commune must be at most 100 characters").optional(),
        )
        .text(fields::PHONE, phone_rule())
}

/// Account creation by an administrator: the profile rules plus an initial
/// password. The password goes to the identity collaborator, never into the profile.
pub fn client_registration_rules() -> RuleSet {
    client_profile_rules().text(
        fields::PASSWORD,
        TextRule::new(6, 128, "password must be at least 6 characters")
            .required_message("password is required"),
    )
}

impl CompanyProfile {
    pub fn from_form(company_id: UserId, input: &FormInput, today: NaiveDate) -> Result<Self, ValidationErrors> {
        accept(&company_profile_rules(), input, today)?;
        Ok(Self {
            company_id,
            name: input.trimmed(fields::NAME).unwrap_or_default().to_string(),
            contact: ContactInfo::from_form(input),
        })
    }
}

/// A validated client account creation: the profile to store and the initial
/// password the caller hands to the identity collaborator.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientRegistration {
    pub profile: ClientProfile,
    pub initial_password: String,
}

impl core::fmt::Debug for ClientRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClientRegistration")
            .field("profile", &self.profile)
            .field("initial_password", &"<redacted>")
            .finish()
    }
}

impl ClientProfile {
    pub fn from_form(client_id: UserId, input: &FormInput, today: NaiveDate) -> Result<Self, ValidationErrors> {
        Self::checked(&client_profile_rules(), client_id, input, today)
    }

    /// Like [`ClientProfile::from_form`], also requiring the initial password.
    pub fn from_registration(
        client_id: UserId,
        input: &FormInput,
        today: NaiveDate,
    ) -> Result<ClientRegistration, ValidationErrors> {
        let profile = Self::checked(&client_registration_rules(), client_id, input, today)?;
        Ok(ClientRegistration {
            profile,
            initial_password: input.get(fields::PASSWORD).unwrap_or_default().to_string(),
        })
    }

    fn checked(rules: &RuleSet, client_id: UserId, input: &FormInput, today: NaiveDate) -> Result<Self, ValidationErrors> {
        let mut errors = match accept(rules, input, today) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        let email = input.trimmed(fields::EMAIL).unwrap_or_default();
        if !email.is_empty() && !looks_like_email(email) {
            errors.insert(fields::EMAIL, "email must look like name@domain");
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            client_id,
            name: input.trimmed(fields::NAME).unwrap_or_default().to_string(),
            email: email.to_string(),
            contact: ContactInfo::from_form(input),
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}
