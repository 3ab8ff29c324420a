use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::favorite::FavoriteView;
use service::favorite::FavoriteInput;

use crate::{errors::ApiError, state::AppState};

#[utoipa::path(
    get, path = "/api/favs", tag = "favs",
    responses(
        (status = 200, description = "All favorites", body = [crate::openapi::FavoriteDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FavoriteView>>, ApiError> {
    Ok(Json(state.favorites.list().await?))
}

#[utoipa::path(
    post, path = "/api/favs", tag = "favs",
    request_body = crate::openapi::FavoriteInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::FavoriteDoc),
        (status = 400, description = "Missing or invalid fields", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<FavoriteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<FavoriteView>), ApiError> {
    let Json(input) = payload?;
    let created = state.favorites.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/favs/{id}", tag = "favs",
    params(("id" = String, Path, description = "Favorite id (24 hex chars)")),
    request_body = crate::openapi::FavoriteInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::FavoriteDoc),
        (status = 400, description = "Malformed id or validation error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FavoriteInput>, JsonRejection>,
) -> Result<Json<FavoriteView>, ApiError> {
    let Json(input) = payload?;
    Ok(Json(state.favorites.update(&id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/favs/{id}", tag = "favs",
    params(("id" = String, Path, description = "Favorite id (24 hex chars)")),
    responses(
        (status = 204, description = "Deleted, or was already absent"),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.favorites.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
