//! Request-scoped context.
//!
//! [`RequestContext`] travels in the request extensions. The request-id middleware creates
//! it, the authentication middleware fills in the user, and handlers read it through the
//! [`CurrentUser`] extractor. Nothing here outlives the request.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use super::error::ApiError;
use crate::model::User;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: String,
    pub user: Option<User>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            user: None,
        }
    }
}

/// The authenticated user of this request. Rejects with 401 when there is none.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .and_then(|ctx| ctx.user.clone())
            .map(CurrentUser)
            .ok_or(ApiError::Unauthenticated)
    }
}
