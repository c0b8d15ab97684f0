//! Account profiles for companies and clients.
//!
//! Profiles are plain records owned by the account collaborator; this crate
//! holds their shape and the rules their edit forms are checked against.

pub mod profile;

pub use profile::{
    ClientProfile, ClientRegistration, CompanyProfile, ContactInfo, client_profile_rules, client_registration_rules,
    company_profile_rules, fields,
};
