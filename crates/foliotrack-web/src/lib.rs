//! # Foliotrack Web
//!
//! JSON HTTP API over the foliotrack engine.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Environment-backed server configuration |
//! | [`routes`] | HTTP route tree and handlers |
//! | [`state`] | Shared application state |

pub mod config;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use routes::router;
pub use state::AppState;
