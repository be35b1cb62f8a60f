//! # Banquito Hex
//!
//! Application service layer and HTTP adapter for the catalog services.
//!
//! ## Architecture
//!
//! - `service` - Branch, interest-rate and product-account services
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - OpenAPI document served under `/swagger-ui`
//!
//! Each service is generic over its repository port; the HTTP server is
//! generic over `R: CatalogRepository`, a store backing all three.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{BranchService, InterestRateService, ProductAccountService};
