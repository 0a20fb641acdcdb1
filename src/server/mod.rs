//! # HTTP Server
//!
//! ## Routes
//!
//! | Route | Access |
//! |---|---|
//! | `POST /users`, `POST /sessions`, `DELETE /sessions` | public |
//! | `GET /private/whoami`, `POST /private/orders`, `GET /private/orders/:id` | logged in |
//! | `POST /admin/menuItem`, `DELETE /admin/menuItem/:id` | admin |
//!
//! The middleware order is documented in [`middleware`].

pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod session;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::info;

use crate::store::Store;
use handlers::{menu_items, orders, sessions, users};
use session::SessionStore;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(store: Store, sessions: impl SessionStore + 'static) -> Self {
        Self {
            store,
            sessions: Arc::new(sessions),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // route_layer: the layer added last runs first
    let admin = Router::new()
        .route("/menuItem", post(menu_items::create))
        .route("/menuItem/:id", delete(menu_items::delete))
        .route_layer(axum::middleware::from_fn(middleware::require_admin))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate,
        ));

    let private = Router::new()
        .route("/whoami", get(users::whoami))
        .route("/orders", post(orders::create))
        .route("/orders/:id", get(orders::show))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate,
        ));

    Router::new()
        .route("/users", post(users::create))
        .route("/sessions", post(sessions::create).delete(sessions::destroy))
        .nest("/admin", admin)
        .nest("/private", private)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::set_request_id))
                .layer(axum::middleware::from_fn(middleware::log_request))
                .layer(middleware::cors()),
        )
        .with_state(state)
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    info!(address = %listener.local_addr()?, "Server running");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
}
