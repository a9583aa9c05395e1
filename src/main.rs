//! DR HIRO server.
//!
//! Entry point for the chat widget application.

use std::sync::Arc;

use dotenvy::dotenv;
use mimalloc::MiMalloc;

use dr_hiro::config::AppConfig;
use dr_hiro::{server, telemetry};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = match AppConfig::load() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing (M-LOG-STRUCTURED)
    telemetry::init(config.log.format);

    server::start_server(config).await
}
