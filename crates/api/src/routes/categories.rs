use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use siteworks_core::model::{CategoryInput, CategoryView, SubcategoryInput, SubcategoryView};

use crate::error::ApiResult;
use crate::extract::ActingUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct KeywordQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryQuery {
    pub category_id: Option<i64>,
}

/// Taxonomy routes: categories and their subcategories.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/categories", get(public_list))
        .route("/v1/admin/categories", get(admin_list).post(create))
        .route(
            "/v1/admin/categories/{id}",
            get(find).put(update).delete(soft_delete),
        )
        .route(
            "/v1/admin/subcategories",
            get(list_subcategories).post(create_subcategory),
        )
        .route(
            "/v1/admin/subcategories/{id}",
            put(update_subcategory).delete(soft_delete_subcategory),
        )
}

async fn public_list(State(state): State<AppState>) -> ApiResult<Json<Vec<CategoryView>>> {
    Ok(Json(state.categories().list().await?))
}

async fn admin_list(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<Vec<CategoryView>>> {
    let rows = match query.q {
        Some(keyword) => state.categories().search(&keyword).await?,
        None => state.categories().list().await?,
    };
    Ok(Json(rows))
}

async fn find(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CategoryView>> {
    Ok(Json(state.categories().find_by_id(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<CategoryInput>,
) -> ApiResult<(StatusCode, Json<CategoryView>)> {
    let view = state.categories().create(input, user_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<CategoryInput>,
) -> ApiResult<Json<CategoryView>> {
    Ok(Json(state.categories().update(id, input, user_id).await?))
}

async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
) -> ApiResult<StatusCode> {
    state.categories().soft_delete(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_subcategories(
    State(state): State<AppState>,
    Query(query): Query<SubcategoryQuery>,
) -> ApiResult<Json<Vec<SubcategoryView>>> {
    Ok(Json(
        state.categories().list_subcategories(query.category_id).await?,
    ))
}

async fn create_subcategory(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<SubcategoryInput>,
) -> ApiResult<(StatusCode, Json<SubcategoryView>)> {
    let view = state.categories().create_subcategory(input, user_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update_subcategory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<SubcategoryInput>,
) -> ApiResult<Json<SubcategoryView>> {
    Ok(Json(
        state.categories().update_subcategory(id, input, user_id).await?,
    ))
}

async fn soft_delete_subcategory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
) -> ApiResult<StatusCode> {
    state.categories().soft_delete_subcategory(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
