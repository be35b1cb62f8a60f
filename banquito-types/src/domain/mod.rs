//! Domain models for the catalog services.

pub mod branch;
pub mod interest_rate;
pub mod product_account;
pub mod state;

pub use branch::{Branch, BranchId};
pub use interest_rate::{InterestRate, InterestRateId, Rate};
pub use product_account::{ProductAccount, ProductAccountId};
pub use state::State;
