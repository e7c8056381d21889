//! # Checkout Sandbox
//!
//! Local checkout-session backend for the dual-checkout screen.
//!
//! ## Usage
//!
//! ```bash
//! # Serve on the screen's default backend address
//! checkout-sandbox
//!
//! # Exercise the error path
//! SANDBOX_FAIL_STATUS=500 SANDBOX_FAIL_MESSAGE="service unavailable" checkout-sandbox
//! ```

use checkout_sandbox::{routes, AppState, SandboxConfig};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = SandboxConfig::from_env()?;
    let addr = config.socket_addr()?;

    info!("Environment: {}", config.environment);
    info!("Hosted pages under: {}", config.hosted_base_url);
    if let Some(status) = config.fail_status {
        warn!(
            "Every session request will fail with {}: {}",
            status, config.fail_message
        );
    }

    let app = routes::create_router(AppState::new(config));

    info!("Checkout sandbox v{} on http://{}", env!("CARGO_PKG_VERSION"), addr);
    info!("Sessions: POST http://{}/api/checkout/session", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
