//! # Application Lifecycle
//!
//! Wiring, startup and shutdown of the whole service.
//!
//! - [`setup_tracing`] - installs the log subscriber (once, from `main`)
//! - [`Canteen`] - builds the store and session store, owns them while serving and closes
//!   the database on the way out
//! - [`ensure_admin`] - creates the configured admin account on first start
//!
//! ```rust,ignore
//! setup_tracing();
//! let app = Canteen::start(Config::load()?).await?;
//! app.run().await?;
//! ```
//!
//! Shutdown happens on Ctrl+C or SIGTERM: in-flight requests finish, then the pool closes.

pub mod canteen;
pub mod tracing;

pub use self::tracing::*;
pub use self::canteen::*;
