use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use super::{decode, parse_id};
use crate::{
    model::NewMenuItem,
    server::{error::ApiError, AppState},
};

/// `POST /admin/menuItem`
pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let item: NewMenuItem = decode(&body)?;
    item.validate().map_err(ApiError::Validation)?;

    let item = state.store.menu_item().create(item).await?;

    info!(menu_item_id = item.id, price = item.price, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// `DELETE /admin/menuItem/:id`
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.store.menu_item().delete(id).await?;

    info!(menu_item_id = id, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
