//! Listing domain
//!
//! In-memory search, sort and pagination over a fully fetched collection.

mod page;
mod pipeline;
mod query;

pub use page::PagedResult;
pub use pipeline::{list_page, Listable};
pub use query::{ListQuery, SearchSpec, SortOrder, SortSpec};
