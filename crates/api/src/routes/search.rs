use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use siteworks_core::service::SearchResult;

use crate::error::ApiResult;
use crate::routes::categories::KeywordQuery;
use crate::state::AppState;

/// Combined public search across blogs and services.
pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/search", get(search))
}

async fn search(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<SearchResult>> {
    let keyword = query.q.unwrap_or_default();
    Ok(Json(state.search().search_public(&keyword).await?))
}
