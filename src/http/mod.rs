//! HTTP server module.
//!
//! Binds the configured address with `axum-server`, announces the listening
//! port once, and drains connections on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{serve, start_server, ServerError};
