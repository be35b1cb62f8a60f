//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the catalog services.

mod error;
mod handlers;
mod server;

pub use error::ApiError;
pub use server::HttpServer;
