pub mod blogs;
pub mod categories;
pub mod clients;
pub mod enquiries;
pub mod health;
pub mod search;
pub mod services;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(categories::routes())
        .merge(services::routes())
        .merge(blogs::routes())
        .merge(clients::routes())
        .merge(enquiries::routes())
        .merge(search::routes())
        .with_state(state)
}
