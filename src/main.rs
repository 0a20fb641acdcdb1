//! `canteen` binary: loads the configuration from the environment and serves the API.
//!
//! ```bash
//! RUST_LOG=info DATABASE_URL=sqlite://canteen.db?mode=rwc cargo run
//! ```

use canteen::config::Config;
use canteen::lifecycle::{setup_tracing, Canteen};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::load().map_err(|e| e.to_string())?;
    info!(?config, "Starting canteen");

    let app = Canteen::start(config).await.map_err(|e| e.to_string())?;
    app.run().await.map_err(|e| e.to_string())?;

    Ok(())
}
