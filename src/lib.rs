#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Canteen
//!
//! > **Backend for a canteen ordering app.**
//!
//! Users register and log in with a cookie session, admins maintain the menu, and users
//! place orders made of several menu items. Data lives in SQLite, accessed through `sqlx`;
//! the HTTP surface is `axum`.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! Plain records: [`User`](model::User), [`MenuItem`](model::MenuItem),
//! [`Order`](model::Order), [`OrderItem`](model::OrderItem), each with a `New*` payload.
//!
//! ### 2. Persistence ([`store`])
//! One repository trait per entity and the [`Store`](store::Store) aggregate that owns one
//! instance of each over a shared pool.
//! - **Key items**: [`UserRepository`](store::UserRepository),
//!   [`MenuItemRepository`](store::MenuItemRepository), [`store::mock`] for fault injection.
//!
//! ### 3. The Workflow ([`ordering`])
//! [`place_order`](ordering::place_order): price lookup, total, order insert, item inserts,
//! and a compensating delete when an item insert fails.
//!
//! ### 4. The Interface ([`server`])
//! Router, middleware chain (request id, logging, CORS, authentication, admin check),
//! cookie sessions and JSON error mapping.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! Environment configuration, tracing setup, startup and graceful shutdown.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! CANTEEN_ADMIN_EMAIL=admin@example.com CANTEEN_ADMIN_PASSWORD=changeme \
//!     RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```
//!
//! Tests use an in-memory SQLite database; nothing external is needed.

pub mod config;
pub mod lifecycle;
pub mod model;
pub mod ordering;
pub mod server;
pub mod store;
