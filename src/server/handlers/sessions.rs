use axum::{
    body::Bytes,
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::decode;
use crate::server::{error::ApiError, session, AppState};

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// `POST /sessions` - checks the credentials and sets the session cookie.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: LoginRequest = decode(&body)?;

    let user = state.store.user().find_by_email(&req.email).await.map_err(|e| {
        debug!(error = %e, "Login lookup failed");
        ApiError::InvalidCredentials
    })?;
    if !user.password_matches(&req.password).await {
        return Err(ApiError::InvalidCredentials);
    }

    if let Some(previous) = session::session_id(&headers) {
        state.sessions.destroy(&previous).await;
    }
    let session_id = state.sessions.create(user.id).await;

    info!(user_id = user.id, "Logged in");
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, session::session_cookie(&session_id, state.sessions.ttl()))],
    ))
}

/// `DELETE /sessions` - logs out. Succeeds whether or not a session existed.
pub async fn destroy(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(session_id) = session::session_id(&headers) {
        state.sessions.destroy(&session_id).await;
    }

    (StatusCode::NO_CONTENT, [(SET_COOKIE, session::expired_cookie())])
}
