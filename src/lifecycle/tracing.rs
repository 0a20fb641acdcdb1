//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter once, from `main`.
//! Module paths are hidden (`with_target(false)`); the structured fields say where a line
//! came from.
//!
//! ## Levels
//!
//! ```bash
//! # one line per request start and completion
//! RUST_LOG=info cargo run
//!
//! # adds repository calls, sessions and rejected requests
//! RUST_LOG=canteen=debug cargo run
//!
//! # only the database layer
//! RUST_LOG=canteen::store=debug cargo run
//! ```
//!
//! ## Request spans
//!
//! Every line logged while handling a request sits inside a `request` span carrying the
//! request id and the remote address, so the compact output reads:
//!
//! ```text
//! INFO request{request_id=5f0c… remote_addr=127.0.0.1:51234}: started POST /private/orders
//! INFO request{…}:place_order{user_id=3}: Order placed order_id=12 total_amount=940 items=3
//! INFO request{…}: completed with 201 Created in 3.1ms
//! ```
//!
//! A compensating delete that fails is logged at `ERROR` with `reconciliation_candidate=true`;
//! grep for that field to find orders left without their items.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // fields carry the context, module paths are noise
        .compact() // spans inline, e.g. "request{..}:place_order{..}"
        .init();
}
