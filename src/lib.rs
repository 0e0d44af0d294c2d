//! echo-api - JSON echo and health check service
//!
//! Two routes on an axum router: `POST /echo` reflects a JSON body and
//! `GET /health` answers liveness probes with `OK`.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use error::AppError;
pub use routes::create_router;
