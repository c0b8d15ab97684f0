//! Catalog query engine.
//!
//! Turns one company's product list into the visible slice:
//! filter, then stable sort, then paginate. Nothing is cached; product
//! states are derived from the reference time given with each call.

pub mod filter;
pub mod page;
pub mod query;
pub mod sort;

pub use filter::CatalogFilter;
pub use page::{CatalogPage, PageRequest};
pub use query::{CatalogQuery, run};
pub use sort::{SortDirection, SortKey, SortSpec};
