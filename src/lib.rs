//! # Subscription Service
//!
//! CRUD and cost aggregation over user subscriptions, stored in PostgreSQL
//! and served over a JSON REST API.
//!
//! List and cost requests are turned into parameterised SQL by
//! [`repository::query_criteria`], which also clamps out-of-range page
//! requests against the matching row count.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use subscription_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!
//!     let app = App::new(&config.database).await?;
//!     app.bootstrap_schema().await?;
//!
//!     let router = build_router(
//!         AppState::new(app.subscription_service()?),
//!         config.server.request_timeout(),
//!     );
//!     let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
//!     axum::serve(listener, router).await?;
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod domain;
pub mod errors;
pub mod http;
pub mod prelude;
pub mod repository;
pub mod schema;
pub mod service;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use core::App;
pub use errors::AppError;

pub use config::{AppConfig, DatabaseConfig, LoggingConfig, ServerConfig};

pub use store_object;
