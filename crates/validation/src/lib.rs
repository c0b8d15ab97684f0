//! Field validation shared by create and edit flows.
//!
//! Rules are declarative ([`RuleSet`]) and evaluated by one function,
//! [`validate_field`]. Live (per-keystroke) validation and final submit
//! validation both go through it, so they always agree on the same input.
//!
//! Validation never fails with an error of its own: it returns a
//! [`ValidationErrors`] map and the caller decides whether to block.

pub mod engine;
pub mod form;
pub mod rules;

pub use engine::{ValidationErrors, accept, validate_all, validate_field};
pub use form::{FormInput, FormState};
pub use rules::{DateRule, FieldRule, NumericRule, RuleSet, TextRule};
