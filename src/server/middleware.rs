//! The request pipeline.
//!
//! Applied to every request, outermost first:
//! 1. [`set_request_id`] - fresh `X-Request-ID`, stored in the [`RequestContext`]
//! 2. [`log_request`] - start/completion lines inside a span carrying the request id
//! 3. CORS (see [`cors`])
//!
//! Applied per route group:
//! 4. [`authenticate`] - `/admin` and `/private`
//! 5. [`require_admin`] - `/admin` only, always after [`authenticate`]

use std::{net::SocketAddr, time::Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use super::{context::RequestContext, error::ApiError, session, AppState};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub async fn set_request_id(mut req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut()
        .insert(RequestContext::new(request_id.clone()));

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub async fn log_request(req: Request, next: Next) -> Response {
    let request_id = req
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let span = info_span!("request", %request_id, %remote_addr);
    async move {
        info!("started {} {}", req.method(), req.uri());
        let start = Instant::now();

        let response = next.run(req).await;

        let status = response.status();
        info!(
            "completed with {} {} in {:?}",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            start.elapsed()
        );
        response
    }
    .instrument(span)
    .await
}

/// Any origin may call the API.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Resolves the session cookie to a [`User`](crate::model::User) and stores it in the
/// request context. Any failure along the way is a 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = session::session_id(req.headers()).ok_or(ApiError::Unauthenticated)?;
    let user_id = state
        .sessions
        .user_id(&session_id)
        .await
        .ok_or(ApiError::Unauthenticated)?;
    let user = state.store.user().find(user_id).await.map_err(|e| {
        debug!(user_id, error = %e, "Session user could not be loaded");
        ApiError::Unauthenticated
    })?;

    debug!(user_id = user.id, role = %user.role, "Authenticated");
    match req.extensions_mut().get_mut::<RequestContext>() {
        Some(ctx) => ctx.user = Some(user),
        None => {
            req.extensions_mut().insert(RequestContext {
                user: Some(user),
                ..RequestContext::default()
            });
        }
    }

    Ok(next.run(req).await)
}

/// Lets only admins through. Expects [`authenticate`] to have run.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<RequestContext>()
        .and_then(|ctx| ctx.user.as_ref())
        .ok_or(ApiError::Unauthenticated)?;

    if !user.is_admin() {
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn completion_line_has_the_real_status() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = Router::new()
            .route("/teapot", get(|| async { axum::http::StatusCode::IM_A_TEAPOT }))
            .layer(axum::middleware::from_fn(log_request))
            .layer(axum::middleware::from_fn(set_request_id));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/teapot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let request_id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();

        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("started GET /teapot"), "{logs}");
        assert!(logs.contains("completed with 418 I'm a teapot in "), "{logs}");
        assert!(logs.contains(&format!("request_id={request_id}")), "{logs}");
        assert!(logs.contains("remote_addr=-"), "{logs}");
    }
}
