//! Repository port traits.
//!
//! One port per catalog. Adapters (Postgres, SQLite, in-memory mocks)
//! implement them; none of them carries business rules.

use std::sync::Arc;

use crate::domain::{
    Branch, BranchId, InterestRate, InterestRateId, ProductAccount, ProductAccountId, State,
};
use crate::error::RepoError;

/// Storage port for branches.
#[async_trait::async_trait]
pub trait BranchRepository: Send + Sync + 'static {
    /// Lists every branch in the store's natural order.
    async fn list_branches(&self) -> Result<Vec<Branch>, RepoError>;

    /// Gets a branch by its store identifier.
    async fn find_branch_by_id(&self, id: BranchId) -> Result<Option<Branch>, RepoError>;

    /// Gets a branch by its business code.
    async fn find_branch_by_code(&self, code: &str) -> Result<Option<Branch>, RepoError>;

    /// Inserts a branch without id (assigning one) or upserts by id.
    async fn save_branch(&self, branch: Branch) -> Result<Branch, RepoError>;
}

/// Storage port for interest rates.
#[async_trait::async_trait]
pub trait InterestRateRepository: Send + Sync + 'static {
    async fn list_interest_rates(&self) -> Result<Vec<InterestRate>, RepoError>;

    async fn find_interest_rate_by_id(
        &self,
        id: InterestRateId,
    ) -> Result<Option<InterestRate>, RepoError>;

    async fn find_interest_rates_by_state(
        &self,
        state: State,
    ) -> Result<Vec<InterestRate>, RepoError>;

    /// Inserts a rate without id (the store assigns the next one) or upserts by id.
    async fn save_interest_rate(&self, rate: InterestRate) -> Result<InterestRate, RepoError>;
}

/// Storage port for product accounts.
#[async_trait::async_trait]
pub trait ProductAccountRepository: Send + Sync + 'static {
    async fn list_product_accounts(&self) -> Result<Vec<ProductAccount>, RepoError>;

    async fn find_product_account_by_id(
        &self,
        id: &ProductAccountId,
    ) -> Result<Option<ProductAccount>, RepoError>;

    async fn find_product_accounts_by_state(
        &self,
        state: State,
    ) -> Result<Vec<ProductAccount>, RepoError>;

    /// Inserts an account without id (assigning a UUID) or upserts by id.
    async fn save_product_account(
        &self,
        account: ProductAccount,
    ) -> Result<ProductAccount, RepoError>;
}

/// A single store backing all three catalogs.
pub trait CatalogRepository:
    BranchRepository + InterestRateRepository + ProductAccountRepository
{
}

impl<T> CatalogRepository for T where
    T: BranchRepository + InterestRateRepository + ProductAccountRepository
{
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared handles: one store can back several services
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl<T: BranchRepository + ?Sized> BranchRepository for Arc<T> {
    async fn list_branches(&self) -> Result<Vec<Branch>, RepoError> {
        (**self).list_branches().await
    }

    async fn find_branch_by_id(&self, id: BranchId) -> Result<Option<Branch>, RepoError> {
        (**self).find_branch_by_id(id).await
    }

    async fn find_branch_by_code(&self, code: &str) -> Result<Option<Branch>, RepoError> {
        (**self).find_branch_by_code(code).await
    }

    async fn save_branch(&self, branch: Branch) -> Result<Branch, RepoError> {
        (**self).save_branch(branch).await
    }
}

#[async_trait::async_trait]
impl<T: InterestRateRepository + ?Sized> InterestRateRepository for Arc<T> {
    async fn list_interest_rates(&self) -> Result<Vec<InterestRate>, RepoError> {
        (**self).list_interest_rates().await
    }

    async fn find_interest_rate_by_id(
        &self,
        id: InterestRateId,
    ) -> Result<Option<InterestRate>, RepoError> {
        (**self).find_interest_rate_by_id(id).await
    }

    async fn find_interest_rates_by_state(
        &self,
        state: State,
    ) -> Result<Vec<InterestRate>, RepoError> {
        (**self).find_interest_rates_by_state(state).await
    }

    async fn save_interest_rate(&self, rate: InterestRate) -> Result<InterestRate, RepoError> {
        (**self).save_interest_rate(rate).await
    }
}

#[async_trait::async_trait]
impl<T: ProductAccountRepository + ?Sized> ProductAccountRepository for Arc<T> {
    async fn list_product_accounts(&self) -> Result<Vec<ProductAccount>, RepoError> {
        (**self).list_product_accounts().await
    }

    async fn find_product_account_by_id(
        &self,
        id: &ProductAccountId,
    ) -> Result<Option<ProductAccount>, RepoError> {
        (**self).find_product_account_by_id(id).await
    }

    async fn find_product_accounts_by_state(
        &self,
        state: State,
    ) -> Result<Vec<ProductAccount>, RepoError> {
        (**self).find_product_accounts_by_state(state).await
    }

    async fn save_product_account(
        &self,
        account: ProductAccount,
    ) -> Result<ProductAccount, RepoError> {
        (**self).save_product_account(account).await
    }
}
