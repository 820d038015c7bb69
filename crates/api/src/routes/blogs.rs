use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use siteworks_core::model::{
    BlogAdminView, BlogFaqInput, BlogFaqView, BlogInput, BlogPublicView,
};

use crate::error::{ApiError, ApiResult};
use crate::extract::ActingUser;
use crate::routes::categories::KeywordQuery;
use crate::routes::services::LimitQuery;
use crate::state::AppState;

const DEFAULT_LATEST_LIMIT: i64 = 3;

/// Blog routes: posts, their FAQs, and the public read family.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/blogs", get(public_list))
        .route("/v1/blogs/latest", get(latest))
        .route("/v1/blogs/featured", get(featured))
        .route("/v1/blogs/category/{id}", get(by_category))
        .route("/v1/blogs/subcategory/{id}", get(by_subcategory))
        .route("/v1/blogs/service/{id}", get(by_service))
        .route("/v1/blogs/{slug}", get(by_slug))
        .route("/v1/admin/blogs", get(admin_list).post(create))
        .route(
            "/v1/admin/blogs/{id}",
            get(find).put(update).delete(soft_delete),
        )
        .route("/v1/admin/blogs/{id}/faqs", get(list_faqs).post(add_faq))
        .route(
            "/v1/admin/blogs/{id}/faqs/{faq_id}",
            put(update_faq).delete(soft_delete_faq),
        )
}

async fn public_list(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<Vec<BlogPublicView>>> {
    let rows = match query.q {
        Some(keyword) => state.blogs().search_public(&keyword).await?,
        None => state.blogs().list_public().await?,
    };
    Ok(Json(rows))
}

async fn latest(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<Vec<BlogPublicView>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LATEST_LIMIT).max(1);
    Ok(Json(state.blogs().latest_public(limit).await?))
}

async fn featured(State(state): State<AppState>) -> ApiResult<Json<Vec<BlogPublicView>>> {
    Ok(Json(state.blogs().featured_public().await?))
}

async fn by_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<BlogPublicView>>> {
    Ok(Json(state.blogs().public_by_category(id).await?))
}

async fn by_subcategory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<BlogPublicView>>> {
    Ok(Json(state.blogs().public_by_subcategory(id).await?))
}

async fn by_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<BlogPublicView>>> {
    Ok(Json(state.blogs().public_by_service(id).await?))
}

async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<BlogPublicView>> {
    state
        .blogs()
        .fetch_by_slug_and_record_visit(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Blog not found".to_string()))
}

async fn admin_list(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<Vec<BlogAdminView>>> {
    let rows = match query.q {
        Some(keyword) => state.blogs().search(&keyword).await?,
        None => state.blogs().list().await?,
    };
    Ok(Json(rows))
}

async fn find(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<BlogAdminView>> {
    Ok(Json(state.blogs().find_by_id(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<BlogInput>,
) -> ApiResult<(StatusCode, Json<BlogAdminView>)> {
    let view = state.blogs().create(input, user_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<BlogInput>,
) -> ApiResult<Json<BlogAdminView>> {
    Ok(Json(state.blogs().update(id, input, user_id).await?))
}

async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
) -> ApiResult<StatusCode> {
    state.blogs().soft_delete(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_faqs(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<BlogFaqView>>> {
    Ok(Json(state.blogs().list_faqs(id).await?))
}

async fn add_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<BlogFaqInput>,
) -> ApiResult<(StatusCode, Json<BlogFaqView>)> {
    let view = state.blogs().add_faq(id, input, user_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update_faq(
    State(state): State<AppState>,
    Path((id, faq_id)): Path<(i64, i64)>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<BlogFaqInput>,
) -> ApiResult<Json<BlogFaqView>> {
    Ok(Json(state.blogs().update_faq(id, faq_id, input, user_id).await?))
}

async fn soft_delete_faq(
    State(state): State<AppState>,
    Path((id, faq_id)): Path<(i64, i64)>,
    ActingUser(user_id): ActingUser,
) -> ApiResult<StatusCode> {
    state.blogs().soft_delete_faq(id, faq_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
