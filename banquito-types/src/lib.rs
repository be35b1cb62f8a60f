//! # Banquito Types
//!
//! Domain types and port traits for the Banquito catalog services
//! (branches, interest rates, product accounts).
//! This crate has no IO dependencies - only data structures,
//! entity rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal architecture:
//! - `domain/` - Entities (Branch, InterestRate, ProductAccount) and the state flag
//! - `ports/` - Repository traits that adapters must implement
//! - `dto/` - RQRS objects for the HTTP boundary
//! - `error/` - Domain, repository and CRUD error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Branch, BranchId, InterestRate, InterestRateId, ProductAccount, ProductAccountId, Rate, State,
};
pub use dto::*;
pub use error::{CrudError, DomainError, RepoError};
pub use ports::{
    BranchRepository, CatalogRepository, InterestRateRepository, ProductAccountRepository,
};
