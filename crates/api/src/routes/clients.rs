use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use siteworks_core::model::{ClientInput, ClientView};

use crate::error::ApiResult;
use crate::extract::ActingUser;
use crate::routes::categories::KeywordQuery;
use crate::state::AppState;

/// Client logo routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/clients", get(public_list))
        .route("/v1/admin/clients", get(admin_list).post(create))
        .route(
            "/v1/admin/clients/{id}",
            get(find).put(update).delete(soft_delete),
        )
}

async fn public_list(State(state): State<AppState>) -> ApiResult<Json<Vec<ClientView>>> {
    Ok(Json(state.clients().list_public().await?))
}

async fn admin_list(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<Vec<ClientView>>> {
    let rows = match query.q {
        Some(keyword) => state.clients().search(&keyword).await?,
        None => state.clients().list().await?,
    };
    Ok(Json(rows))
}

async fn find(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<ClientView>> {
    Ok(Json(state.clients().find_by_id(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<ClientInput>,
) -> ApiResult<(StatusCode, Json<ClientView>)> {
    let view = state.clients().create(input, user_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
    Json(input): Json<ClientInput>,
) -> ApiResult<Json<ClientView>> {
    Ok(Json(state.clients().update(id, input, user_id).await?))
}

async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
) -> ApiResult<StatusCode> {
    state.clients().soft_delete(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
