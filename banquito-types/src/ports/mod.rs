//! Port traits (interfaces for adapters).
//!
//! The services depend on these traits, never on a concrete store.

mod repository;

pub use repository::{
    BranchRepository, CatalogRepository, InterestRateRepository, ProductAccountRepository,
};
