use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tracing::info;

use super::decode;
use crate::{
    model::NewUser,
    server::{context::CurrentUser, error::ApiError, AppState},
};

#[derive(Deserialize)]
struct RegisterRequest {
    email: String,
    password: String,
}

/// `POST /users` - self-registration, always with the `user` role.
pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let req: RegisterRequest = decode(&body)?;

    let user = state
        .store
        .user()
        .create(NewUser::registration(req.email, req.password))
        .await?;

    info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /private/whoami`
pub async fn whoami(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(user)
}
