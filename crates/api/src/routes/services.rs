use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use siteworks_core::model::{ServiceAdminView, ServiceInput, ServicePublicView};

use crate::error::{ApiError, ApiResult};
use crate::extract::ActingUser;
use crate::routes::categories::KeywordQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

const DEFAULT_LATEST_LIMIT: i64 = 6;

/// Service catalog routes. Public reads are projection-scoped; the
/// single-item slug fetch records a visit.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/services", get(public_list))
        .route("/v1/services/latest", get(latest))
        .route("/v1/services/featured", get(featured))
        .route("/v1/services/category/{id}", get(by_category))
        .route("/v1/services/subcategory/{id}", get(by_subcategory))
        .route("/v1/services/{slug}", get(by_slug))
        .route("/v1/admin/services", get(admin_list).post(create))
        .route(
            "/v1/admin/services/{id}",
            get(find).put(update).delete(soft_delete),
        )
}

async fn public_list(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<Vec<ServicePublicView>>> {
    let rows = match query.q {
        Some(keyword) => state.catalog().search_public(&keyword).await?,
        None => state.catalog().list_public().await?,
    };
    Ok(Json(rows))
}

async fn latest(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<Vec<ServicePublicView>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LATEST_LIMIT).max(1);
    Ok(Json(state.catalog().latest_public(limit).await?))
}

async fn featured(State(state): State<AppState>) -> ApiResult<Json<Vec<ServicePublicView>>> {
    Ok(Json(state.catalog().featured_public().await?))
}

async fn by_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<ServicePublicView>>> {
    Ok(Json(state.catalog().public_by_category(id).await?))
}

async fn by_subcategory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<ServicePublicView>>> {
    Ok(Json(state.catalog().public_by_subcategory(id).await?))
}

async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<ServicePublicView>> {
    state
        .catalog()
        .fetch_by_slug_and_record_visit(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Service not found".to_string()))
}

async fn admin_list(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<Vec<ServiceAdminView>>> {
    let rows = match query.q {
        Some(keyword) => state.catalog().search(&keyword).await?,
        None => state.catalog().list().await?,
    };
    Ok(Json(rows))
}

async fn find(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ServiceAdminView>> {
    Ok(Json(state.catalog().find_by_id(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<ServiceInput>,
) -> ApiResult<(StatusCode, Json<ServiceAdminView>)> {
    let view = state.catalog().create(input, user_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<ServiceInput>,
) -> ApiResult<Json<ServiceAdminView>> {
    Ok(Json(state.catalog().update(id, input, user_id).await?))
}

async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
) -> ApiResult<StatusCode> {
    state.catalog().soft_delete(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
