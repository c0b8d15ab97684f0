//! `rescata-core`: shared building blocks for the marketplace domain.
//!
//! This crate contains **pure domain** primitives (no storage, no transport).

pub mod clock;
pub mod date;
pub mod error;
pub mod id;

pub use clock::{Now, SystemClock};
pub use date::parse_calendar_date;
pub use error::DomainError;
pub use id::{AggregateId, UserId};
