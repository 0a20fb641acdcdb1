use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{decode, parse_id};
use crate::{
    ordering::{self, OrderRequest},
    server::{context::CurrentUser, error::ApiError, AppState},
};

/// `POST /private/orders`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: OrderRequest = decode(&body)?;

    let placed = ordering::place_order(&state.store, &user, &req).await?;

    Ok((StatusCode::CREATED, Json(placed)))
}

/// `GET /private/orders/:id`
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let order = ordering::find_order(&state.store, &user, id).await?;

    Ok(Json(order))
}
