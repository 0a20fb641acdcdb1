use axum::Router;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::{
    config::{AdminAccount, Config},
    model::{NewUser, User},
    server::{self, session::MemorySessionStore, AppState},
    store::{Store, StoreError},
};

/// The running service: the store, the session store and the address to serve on.
///
/// # Example
///
/// ```ignore
/// let app = Canteen::start(Config::default()).await?;
/// let router = app.router(); // for tests, or to nest elsewhere
/// app.run().await?;          // serve until Ctrl+C / SIGTERM, then close the store
/// ```
pub struct Canteen {
    config: Config,
    state: AppState,
}

impl Canteen {
    /// Opens the database, applies migrations and makes sure the admin account exists.
    pub async fn start(config: Config) -> Result<Self, StoreError> {
        info!("Initializing store...");
        let store = Store::connect(&config.database_url, config.database_max_connections).await?;

        if let Some(admin) = &config.admin {
            ensure_admin(&store, admin).await?;
        }

        let state = AppState::new(store, MemorySessionStore::new(config.session_ttl));
        Ok(Self { config, state })
    }

    pub fn store(&self) -> &Store {
        &self.state.store
    }

    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    /// Serves until a shutdown signal arrives, then closes the store.
    pub async fn run(self) -> std::io::Result<()> {
        info!(address = %self.config.bind_addr, "Binding");
        let listener = TcpListener::bind(&self.config.bind_addr).await?;

        let served = server::serve(listener, self.router(), shutdown_signal()).await;

        self.shutdown().await;
        served
    }

    pub async fn shutdown(self) {
        info!("Shutting down...");
        self.state.store.close().await;
        info!("Shutdown complete.");
    }
}

/// Creates the admin account unless a user with that email already exists.
pub async fn ensure_admin(store: &Store, admin: &AdminAccount) -> Result<User, StoreError> {
    match store.user().find_by_email(&admin.email).await {
        Ok(user) => {
            if !user.is_admin() {
                error!(user_id = user.id, "Configured admin email belongs to a non-admin account");
            }
            Ok(user)
        }
        Err(e) if e.is_not_found() => {
            let user = store
                .user()
                .create(NewUser::admin(&admin.email, &admin.password))
                .await?;
            info!(user_id = user.id, "Admin account created");
            Ok(user)
        }
        Err(e) => Err(e),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let store = Store::connect("sqlite::memory:", 1).await.unwrap();
        let admin = AdminAccount {
            email: "root@example.com".into(),
            password: "rootpass".into(),
        };

        let first = ensure_admin(&store, &admin).await.unwrap();
        let second = ensure_admin(&store, &admin).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.role, Role::Admin);
    }
}
