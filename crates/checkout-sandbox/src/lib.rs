//! # checkout-sandbox
//!
//! Local stand-in for the checkout backend.
//!
//! Issues fresh test tokens on every request so both checkout flows of the
//! screen can be driven without a payment provider account.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/checkout/session` | Issue a checkout session |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, SandboxConfig};
