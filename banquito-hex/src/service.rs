//! Catalog Application Services
//!
//! Orchestrate entity rules through the repository ports.
//! Contain NO infrastructure logic - existence checks, default stamping and
//! translation of storage failures into [`CrudError`] codes.

use chrono::Utc;

use banquito_types::{
    Branch, BranchId, BranchRepository, CrudError, InterestRate, InterestRateId,
    InterestRateRepository, ProductAccount, ProductAccountId, ProductAccountRepository, State,
};

// ─────────────────────────────────────────────────────────────────────────────
// Branches
// ─────────────────────────────────────────────────────────────────────────────

/// Application service for the branch registry.
///
/// Generic over `R: BranchRepository` - the adapter is injected at compile time.
pub struct BranchService<R: BranchRepository> {
    repo: R,
}

impl<R: BranchRepository> BranchService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists every branch.
    pub async fn get_all(&self) -> Result<Vec<Branch>, CrudError> {
        self.repo
            .list_branches()
            .await
            .map_err(|e| CrudError::read_failed(Branch::ENTITY, e))
    }

    /// Gets a branch by store id, failing with 404 when it does not exist.
    pub async fn look_by_id(&self, id: BranchId) -> Result<Branch, CrudError> {
        self.repo
            .find_branch_by_id(id)
            .await
            .map_err(|e| CrudError::read_failed(Branch::ENTITY, e))?
            .ok_or_else(|| CrudError::not_found(Branch::ENTITY, id))
    }

    /// Gets a branch by business code. Absence is not an error here.
    pub async fn look_by_code(&self, code: &str) -> Result<Option<Branch>, CrudError> {
        self.repo
            .find_branch_by_code(code)
            .await
            .map_err(|e| CrudError::read_failed(Branch::ENTITY, e))
    }

    #[tracing::instrument(skip(self, branch), fields(code = %branch.code))]
    pub async fn create(&self, branch: Branch) -> Result<Branch, CrudError> {
        self.repo.save_branch(branch).await.map_err(|e| {
            tracing::warn!(error = %e, "branch create failed");
            CrudError::create_failed(Branch::ENTITY, e)
        })
    }

    /// Overwrites the name of the branch identified by `code`.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update(&self, code: &str, changes: Branch) -> Result<Branch, CrudError> {
        let update_failed = |cause: &dyn std::fmt::Display| {
            tracing::warn!(error = %cause, "branch update failed");
            CrudError::update_failed(Branch::ENTITY, cause)
        };

        let mut branch = self
            .repo
            .find_branch_by_code(code)
            .await
            .map_err(|e| update_failed(&e))?
            .ok_or_else(|| update_failed(&CrudError::code_not_found(Branch::ENTITY, code)))?;

        branch.overwrite_with(changes);
        self.repo
            .save_branch(branch)
            .await
            .map_err(|e| update_failed(&e))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interest rates
// ─────────────────────────────────────────────────────────────────────────────

/// Application service for the interest-rate catalog.
pub struct InterestRateService<R: InterestRateRepository> {
    repo: R,
}

impl<R: InterestRateRepository> InterestRateService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists the rates in state `ACT`.
    pub async fn list_all_actives(&self) -> Result<Vec<InterestRate>, CrudError> {
        self.repo
            .find_interest_rates_by_state(State::Active)
            .await
            .map_err(|e| CrudError::read_failed(InterestRate::ENTITY, e))
    }

    pub async fn obtain_by_id(&self, id: InterestRateId) -> Result<InterestRate, CrudError> {
        self.repo
            .find_interest_rate_by_id(id)
            .await
            .map_err(|e| CrudError::read_failed(InterestRate::ENTITY, e))?
            .ok_or_else(|| CrudError::not_found(InterestRate::ENTITY, id))
    }

    /// Stamps `start` when missing and persists the rate.
    #[tracing::instrument(skip(self, rate), fields(name = %rate.name))]
    pub async fn create(&self, mut rate: InterestRate) -> Result<InterestRate, CrudError> {
        rate.stamp_defaults(Utc::now());
        self.repo.save_interest_rate(rate).await.map_err(|e| {
            tracing::warn!(error = %e, "interest rate create failed");
            CrudError::create_failed(InterestRate::ENTITY, e)
        })
    }

    /// Overwrites name, rate and validity window; state is left as stored.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: InterestRateId,
        changes: InterestRate,
    ) -> Result<InterestRate, CrudError> {
        let update_failed = |cause: &dyn std::fmt::Display| {
            tracing::warn!(error = %cause, "interest rate update failed");
            CrudError::update_failed(InterestRate::ENTITY, cause)
        };

        let mut rate = self
            .repo
            .find_interest_rate_by_id(id)
            .await
            .map_err(|e| update_failed(&e))?
            .ok_or_else(|| update_failed(&CrudError::not_found(InterestRate::ENTITY, id)))?;

        rate.overwrite_with(changes).map_err(|e| update_failed(&e))?;
        self.repo
            .save_interest_rate(rate)
            .await
            .map_err(|e| update_failed(&e))
    }

    /// Moves the rate to `INA` and closes its validity at the current time.
    #[tracing::instrument(skip(self))]
    pub async fn inactivate(&self, id: InterestRateId) -> Result<(), CrudError> {
        let inactivate_failed = |cause: &dyn std::fmt::Display| {
            tracing::warn!(error = %cause, "interest rate inactivation failed");
            CrudError::inactivate_failed(InterestRate::ENTITY, cause)
        };

        let mut rate = self
            .repo
            .find_interest_rate_by_id(id)
            .await
            .map_err(|e| inactivate_failed(&e))?
            .ok_or_else(|| inactivate_failed(&CrudError::not_found(InterestRate::ENTITY, id)))?;

        if !rate.inactivate(Utc::now()) {
            tracing::debug!("interest rate already inactive");
            return Ok(());
        }

        self.repo
            .save_interest_rate(rate)
            .await
            .map(|_| ())
            .map_err(|e| inactivate_failed(&e))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Product accounts
// ─────────────────────────────────────────────────────────────────────────────

/// Application service for the product-account catalog.
pub struct ProductAccountService<R: ProductAccountRepository> {
    repo: R,
}

impl<R: ProductAccountRepository> ProductAccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists the product accounts in state `ACT`.
    pub async fn list_all_actives(&self) -> Result<Vec<ProductAccount>, CrudError> {
        self.repo
            .find_product_accounts_by_state(State::Active)
            .await
            .map_err(|e| CrudError::read_failed(ProductAccount::ENTITY, e))
    }

    pub async fn obtain_by_id(&self, id: &ProductAccountId) -> Result<ProductAccount, CrudError> {
        self.repo
            .find_product_account_by_id(id)
            .await
            .map_err(|e| CrudError::read_failed(ProductAccount::ENTITY, e))?
            .ok_or_else(|| CrudError::not_found(ProductAccount::ENTITY, id))
    }

    /// Stamps the creation date and persists the account.
    #[tracing::instrument(skip(self, account), fields(name = %account.name))]
    pub async fn create(&self, mut account: ProductAccount) -> Result<ProductAccount, CrudError> {
        account.stamp_defaults(Utc::now());
        self.repo.save_product_account(account).await.map_err(|e| {
            tracing::warn!(error = %e, "product account create failed");
            CrudError::create_failed(ProductAccount::ENTITY, e)
        })
    }

    #[tracing::instrument(skip(self, changes), fields(id = %id))]
    pub async fn update(
        &self,
        id: &ProductAccountId,
        changes: ProductAccount,
    ) -> Result<ProductAccount, CrudError> {
        let update_failed = |cause: &dyn std::fmt::Display| {
            tracing::warn!(error = %cause, "product account update failed");
            CrudError::update_failed(ProductAccount::ENTITY, cause)
        };

        let mut account = self
            .repo
            .find_product_account_by_id(id)
            .await
            .map_err(|e| update_failed(&e))?
            .ok_or_else(|| update_failed(&CrudError::not_found(ProductAccount::ENTITY, id)))?;

        account.overwrite_with(changes);
        self.repo
            .save_product_account(account)
            .await
            .map_err(|e| update_failed(&e))
    }

    /// Moves the account to `INA`.
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub async fn inactivate(&self, id: &ProductAccountId) -> Result<(), CrudError> {
        let inactivate_failed = |cause: &dyn std::fmt::Display| {
            tracing::warn!(error = %cause, "product account inactivation failed");
            CrudError::inactivate_failed(ProductAccount::ENTITY, cause)
        };

        let mut account = self
            .repo
            .find_product_account_by_id(id)
            .await
            .map_err(|e| inactivate_failed(&e))?
            .ok_or_else(|| {
                inactivate_failed(&CrudError::not_found(ProductAccount::ENTITY, id))
            })?;

        if !account.inactivate() {
            tracing::debug!("product account already inactive");
            return Ok(());
        }

        self.repo
            .save_product_account(account)
            .await
            .map(|_| ())
            .map_err(|e| inactivate_failed(&e))
    }
}
