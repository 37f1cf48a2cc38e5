//! Tycoon server binary.
//!
//! Bind address comes from `TYCOON_ADDR` (default `127.0.0.1:8080`);
//! log filtering from `RUST_LOG` (default `info`).

use tracing_subscriber::EnvFilter;
use tycoon::{TycoonError, TycoonServerBuilder};

#[tokio::main]
async fn main() -> Result<(), TycoonError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("TYCOON_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let server = TycoonServerBuilder::new().bind(&addr).build().await?;
    tracing::info!(%addr, "tycoon-server listening");
    server.run().await
}
