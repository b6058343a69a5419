//! Search client for the product catalog provider.

mod client;
mod error;

pub use client::{CatalogSearch, ChompCatalog, DEFAULT_ENDPOINT, SEARCH_PAGE_SIZE};
pub use error::CatalogError;
