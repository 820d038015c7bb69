use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use siteworks_core::model::{EnquiryInput, EnquiryView, RequestOrigin};

use crate::error::ApiResult;
use crate::extract::ActingUser;
use crate::state::AppState;

/// Enquiry routes. Submission is public and deduplicating; listing and
/// deletion are admin-only.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/enquiries", axum::routing::post(submit))
        .route("/v1/admin/enquiries", get(admin_list))
        .route("/v1/admin/enquiries/{id}", get(find).delete(soft_delete))
}

/// Request attribution from proxy headers. Absent headers stay `None`;
/// the submission never fails on missing attribution.
fn origin_from_headers(headers: &HeaderMap) -> RequestOrigin {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    };
    RequestOrigin {
        ip_address: header_text("x-forwarded-for")
            .map(|chain| chain.split(',').next().unwrap_or_default().trim().to_string()),
        url: header_text("referer"),
    }
}

async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<EnquiryInput>,
) -> ApiResult<(StatusCode, Json<EnquiryView>)> {
    let origin = origin_from_headers(&headers);
    let view = state.enquiries().submit(input, origin).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn admin_list(State(state): State<AppState>) -> ApiResult<Json<Vec<EnquiryView>>> {
    Ok(Json(state.enquiries().list().await?))
}

async fn find(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<EnquiryView>> {
    Ok(Json(state.enquiries().find_by_id(id).await?))
}

async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ActingUser(user_id): ActingUser,
) -> ApiResult<StatusCode> {
    state.enquiries().soft_delete(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
