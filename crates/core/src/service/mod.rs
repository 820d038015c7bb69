//! Content aggregate services: one per entity family, all composing the
//! same lifecycle and validation building blocks around entity-specific
//! fields, plus the enquiry deduplication engine and the combined public
//! search.

pub mod blog;
pub mod catalog;
pub mod category;
pub mod client;
pub mod enquiry;
pub mod search;

pub use blog::BlogService;
pub use catalog::ServiceCatalog;
pub use category::CategoryService;
pub use client::ClientService;
pub use enquiry::EnquiryService;
pub use search::{SearchResult, SiteSearch};
