//! Domain records, mutation inputs, and outbound projections.
//!
//! Records map one-to-one onto Postgres rows (`FromRow`). Inputs are the
//! deserialized request shapes; projections are the admin/customer
//! response shapes built from records.

pub mod blog;
pub mod catalog;
pub mod client;
pub mod enquiry;
pub mod taxonomy;
pub mod user;

pub use blog::{Blog, BlogAdminView, BlogFaq, BlogFaqInput, BlogFaqView, BlogInput, BlogPublicView};
pub use catalog::{Service, ServiceAdminView, ServiceInput, ServicePublicView};
pub use client::{Client, ClientInput, ClientView};
pub use enquiry::{Enquiry, EnquiryInput, EnquiryView, RequestOrigin};
pub use taxonomy::{Category, CategoryInput, CategoryView, Subcategory, SubcategoryInput, SubcategoryView};
pub use user::UserRef;
