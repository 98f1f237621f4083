mod catalog_service;
mod errors;

pub use catalog_service::{BookAdded, SearchType, add_book, list_catalog, search_books};
pub use errors::{CatalogError, Result};
