//! Order intake domain module.
//!
//! This crate contains the order record and the pure decision that turns a
//! client's request plus the current product snapshot into a new order
//! (no IO, no storage). Persisting the result is the caller's job.

pub mod intake;
pub mod order;

pub use intake::{CLIENT_FALLBACK_NAME, OrderError, prepare_order};
pub use order::{NewOrder, Order, OrderId, OrderRequest, OrderStatus};
