//! Content lifecycle and identity-deduplication engine for the marketing
//! site backend. Everything with decision logic lives here; HTTP routing
//! and request parsing live in the `siteworks-api` crate.

pub mod clock;
pub mod error;
pub mod ident;
pub mod lifecycle;
pub mod model;
pub mod service;
pub mod store;
pub mod validate;

pub use error::CoreError;
