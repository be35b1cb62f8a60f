//! Catalog service unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;

    use banquito_types::{
        Branch, BranchId, BranchRepository, CrudError, InterestRate, InterestRateId,
        InterestRateRepository, ProductAccount, ProductAccountId, ProductAccountRepository, Rate,
        RepoError, State,
    };

    use crate::service::{BranchService, InterestRateService, ProductAccountService};

    /// Simple in-memory repository backing all three catalogs.
    ///
    /// Counts `save_*` calls and can be told to fail every write.
    pub struct MockRepo {
        branches: Mutex<Vec<Branch>>,
        rates: Mutex<Vec<InterestRate>>,
        products: Mutex<Vec<ProductAccount>>,
        saves: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                branches: Mutex::new(Vec::new()),
                rates: Mutex::new(Vec::new()),
                products: Mutex::new(Vec::new()),
                saves: AtomicUsize::new(0),
                fail_writes: AtomicBool::new(false),
            }
        }

        /// A repository whose writes all fail with a database error.
        pub fn failing() -> Self {
            let repo = Self::new();
            repo.fail_writes.store(true, Ordering::SeqCst);
            repo
        }

        pub fn save_calls(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }

        fn begin_write(&self) -> Result<(), RepoError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(RepoError::Database("Database connection error".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl BranchRepository for MockRepo {
        async fn list_branches(&self) -> Result<Vec<Branch>, RepoError> {
            Ok(self.branches.lock().unwrap().clone())
        }

        async fn find_branch_by_id(&self, id: BranchId) -> Result<Option<Branch>, RepoError> {
            let branches = self.branches.lock().unwrap();
            Ok(branches.iter().find(|b| b.id == Some(id)).cloned())
        }

        async fn find_branch_by_code(&self, code: &str) -> Result<Option<Branch>, RepoError> {
            let branches = self.branches.lock().unwrap();
            Ok(branches.iter().find(|b| b.code == code).cloned())
        }

        async fn save_branch(&self, mut branch: Branch) -> Result<Branch, RepoError> {
            self.begin_write()?;
            let mut branches = self.branches.lock().unwrap();
            match branch.id {
                Some(id) => {
                    if let Some(slot) = branches.iter_mut().find(|b| b.id == Some(id)) {
                        *slot = branch.clone();
                    } else {
                        branches.push(branch.clone());
                    }
                }
                None => {
                    if branches.iter().any(|b| b.code == branch.code) {
                        return Err(RepoError::Conflict(format!(
                            "duplicate branch code {}",
                            branch.code
                        )));
                    }
                    branch.id = Some(BranchId::new());
                    branches.push(branch.clone());
                }
            }
            Ok(branch)
        }
    }

    #[async_trait]
    impl InterestRateRepository for MockRepo {
        async fn list_interest_rates(&self) -> Result<Vec<InterestRate>, RepoError> {
            Ok(self.rates.lock().unwrap().clone())
        }

        async fn find_interest_rate_by_id(
            &self,
            id: InterestRateId,
        ) -> Result<Option<InterestRate>, RepoError> {
            let rates = self.rates.lock().unwrap();
            Ok(rates.iter().find(|r| r.id == Some(id)).cloned())
        }

        async fn find_interest_rates_by_state(
            &self,
            state: State,
        ) -> Result<Vec<InterestRate>, RepoError> {
            let rates = self.rates.lock().unwrap();
            Ok(rates.iter().filter(|r| r.state == state).cloned().collect())
        }

        async fn save_interest_rate(
            &self,
            mut rate: InterestRate,
        ) -> Result<InterestRate, RepoError> {
            self.begin_write()?;
            let mut rates = self.rates.lock().unwrap();
            match rate.id {
                Some(id) => {
                    if let Some(slot) = rates.iter_mut().find(|r| r.id == Some(id)) {
                        *slot = rate.clone();
                    } else {
                        rates.push(rate.clone());
                    }
                }
                None => {
                    rate.id = Some(InterestRateId::new(rates.len() as i64 + 1));
                    rates.push(rate.clone());
                }
            }
            Ok(rate)
        }
    }

    #[async_trait]
    impl ProductAccountRepository for MockRepo {
        async fn list_product_accounts(&self) -> Result<Vec<ProductAccount>, RepoError> {
            Ok(self.products.lock().unwrap().clone())
        }

        async fn find_product_account_by_id(
            &self,
            id: &ProductAccountId,
        ) -> Result<Option<ProductAccount>, RepoError> {
            let products = self.products.lock().unwrap();
            Ok(products.iter().find(|p| p.id.as_ref() == Some(id)).cloned())
        }

        async fn find_product_accounts_by_state(
            &self,
            state: State,
        ) -> Result<Vec<ProductAccount>, RepoError> {
            let products = self.products.lock().unwrap();
            Ok(products
                .iter()
                .filter(|p| p.state == state)
                .cloned()
                .collect())
        }

        async fn save_product_account(
            &self,
            mut account: ProductAccount,
        ) -> Result<ProductAccount, RepoError> {
            self.begin_write()?;
            let id = account.id.clone().unwrap_or_else(ProductAccountId::generate);
            account.id = Some(id.clone());
            let mut products = self.products.lock().unwrap();
            if let Some(slot) = products.iter_mut().find(|p| p.id.as_ref() == Some(&id)) {
                account.creation_date = slot.creation_date;
                *slot = account.clone();
            } else {
                products.push(account.clone());
            }
            Ok(account)
        }
    }

    fn branch(code: &str, name: &str) -> Branch {
        Branch::new(code.into(), name.into()).unwrap()
    }

    fn rate(name: &str, bps: i64) -> InterestRate {
        InterestRate::new(
            name.into(),
            Rate::from_basis_points(bps).unwrap(),
            State::Active,
            None,
            None,
        )
        .unwrap()
    }

    fn product(id: &str, name: &str) -> ProductAccount {
        ProductAccount::new(
            Some(ProductAccountId::new(id)),
            name.into(),
            format!("{name} description"),
            10_000,
            true,
            false,
            State::Active,
        )
        .unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // BranchService
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_branch_update_overwrites_name_only() {
        let service = BranchService::new(MockRepo::new());
        let created = service.create(branch("001", "Branch 1")).await.unwrap();

        let updated = service
            .update("001", branch("ignored", "Updated Branch 1"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.code, "001");
        assert_eq!(updated.name, "Updated Branch 1");

        let stored = service.look_by_code("001").await.unwrap().unwrap();
        assert_eq!(stored.name, "Updated Branch 1");
    }

    #[tokio::test]
    async fn test_branch_update_unknown_code() {
        let service = BranchService::new(MockRepo::new());

        let err = service
            .update("999", branch("999", "Whatever"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), CrudError::UPDATE_FAILED);
        assert_eq!(
            err.message(),
            "Branch cannot be updated, error:Branch with code: {999} does not exist"
        );
        assert_eq!(service.repo().save_calls(), 0);
    }

    #[tokio::test]
    async fn test_branch_look_by_id_not_found() {
        let service = BranchService::new(MockRepo::new());
        let id = BranchId::new();

        let err = service.look_by_id(id).await.unwrap_err();

        assert_eq!(err.code(), 404);
        assert!(err.message().contains(&id.to_string()));
        assert_eq!(
            err.message(),
            format!("Branch with id: {{{id}}} does not exist")
        );
    }

    #[tokio::test]
    async fn test_branch_look_by_code_absent_is_not_an_error() {
        let service = BranchService::new(MockRepo::new());
        assert!(service.look_by_code("404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_branch_create_saves_once() {
        let service = BranchService::new(MockRepo::new());

        let created = service.create(branch("001", "Branch 1")).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(service.repo().save_calls(), 1);
        assert_eq!(service.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_branch_create_failure_saves_once_and_wraps() {
        let service = BranchService::new(MockRepo::failing());

        let err = service.create(branch("001", "Branch 1")).await.unwrap_err();

        assert_eq!(err.code(), CrudError::CREATE_FAILED);
        assert_eq!(
            err.message(),
            "Branch cannot be created, error:Database connection error"
        );
        assert_eq!(service.repo().save_calls(), 1);
    }

    #[tokio::test]
    async fn test_branch_duplicate_code_is_a_create_failure() {
        let service = BranchService::new(MockRepo::new());
        service.create(branch("001", "Branch 1")).await.unwrap();

        let err = service.create(branch("001", "Again")).await.unwrap_err();

        assert_eq!(err.code(), 510);
        assert!(err.message().starts_with("Branch cannot be created, error:"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // InterestRateService
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_interest_rate_create_stamps_start() {
        let service = InterestRateService::new(MockRepo::new());

        let created = service.create(rate("Savings", 250)).await.unwrap();

        assert_eq!(created.id, Some(InterestRateId::new(1)));
        assert!(created.start.is_some());
        assert!(created.end.is_none());
        assert_eq!(service.repo().save_calls(), 1);
    }

    #[tokio::test]
    async fn test_interest_rate_create_failure() {
        let service = InterestRateService::new(MockRepo::failing());

        let err = service.create(rate("Savings", 250)).await.unwrap_err();

        assert_eq!(err.code(), 510);
        assert_eq!(
            err.message(),
            "Interest Rate cannot be created, error:Database connection error"
        );
        assert_eq!(service.repo().save_calls(), 1);
    }

    #[tokio::test]
    async fn test_interest_rate_obtain_by_id_not_found() {
        let service = InterestRateService::new(MockRepo::new());

        let err = service
            .obtain_by_id(InterestRateId::new(42))
            .await
            .unwrap_err();

        assert_eq!(err.code(), 404);
        assert_eq!(err.message(), "Interest Rate with id: {42} does not exist");
    }

    #[tokio::test]
    async fn test_interest_rate_update_keeps_state() {
        let service = InterestRateService::new(MockRepo::new());
        let created = service.create(rate("Savings", 250)).await.unwrap();
        let id = created.id.unwrap();

        let mut changes = rate("Savings plus", 300);
        changes.state = State::Inactive;
        let updated = service.update(id, changes).await.unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.name, "Savings plus");
        assert_eq!(updated.rate.basis_points(), 300);
        assert_eq!(updated.state, State::Active);
        assert_eq!(updated.start, created.start);
    }

    #[tokio::test]
    async fn test_interest_rate_update_unknown_id() {
        let service = InterestRateService::new(MockRepo::new());

        let err = service
            .update(InterestRateId::new(7), rate("Savings", 250))
            .await
            .unwrap_err();

        assert_eq!(err.code(), 520);
        assert_eq!(
            err.message(),
            "Interest Rate cannot be updated, error:Interest Rate with id: {7} does not exist"
        );
    }

    #[tokio::test]
    async fn test_interest_rate_inactivate_removes_from_actives() {
        let service = InterestRateService::new(MockRepo::new());
        let a = service.create(rate("A", 100)).await.unwrap();
        service.create(rate("B", 200)).await.unwrap();

        service.inactivate(a.id.unwrap()).await.unwrap();

        let actives = service.list_all_actives().await.unwrap();
        assert_eq!(actives.len(), 1);
        assert_eq!(actives[0].name, "B");

        let stored = service.obtain_by_id(a.id.unwrap()).await.unwrap();
        assert_eq!(stored.state, State::Inactive);
        assert!(stored.end.is_some());
    }

    #[tokio::test]
    async fn test_interest_rate_inactivate_twice_does_not_write() {
        let service = InterestRateService::new(MockRepo::new());
        let created = service.create(rate("A", 100)).await.unwrap();
        let id = created.id.unwrap();

        service.inactivate(id).await.unwrap();
        let first_end = service.obtain_by_id(id).await.unwrap().end;
        service.inactivate(id).await.unwrap();

        assert_eq!(service.repo().save_calls(), 2);
        assert_eq!(service.obtain_by_id(id).await.unwrap().end, first_end);
    }

    #[tokio::test]
    async fn test_interest_rate_inactivate_unknown_id() {
        let service = InterestRateService::new(MockRepo::new());

        let err = service
            .inactivate(InterestRateId::new(3))
            .await
            .unwrap_err();

        assert_eq!(err.code(), CrudError::INACTIVATE_FAILED);
        assert_eq!(
            err.message(),
            "Interest Rate cannot be inactivated, error:Interest Rate with id: {3} does not exist"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // ProductAccountService
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_product_account_create_stamps_creation_date() {
        let service = ProductAccountService::new(MockRepo::new());

        let created = service.create(product("001", "Product1")).await.unwrap();

        assert_eq!(created.id, Some(ProductAccountId::new("001")));
        assert!(created.creation_date.is_some());
        assert_eq!(service.repo().save_calls(), 1);
    }

    #[tokio::test]
    async fn test_product_account_create_failure() {
        let service = ProductAccountService::new(MockRepo::failing());

        let err = service.create(product("001", "Product1")).await.unwrap_err();

        assert_eq!(err.code(), 510);
        assert_eq!(
            err.message(),
            "Product Account cannot be created, error:Database connection error"
        );
        assert_eq!(service.repo().save_calls(), 1);
    }

    #[tokio::test]
    async fn test_product_account_update_preserves_creation_date() {
        let service = ProductAccountService::new(MockRepo::new());
        let created = service.create(product("001", "Product1")).await.unwrap();
        let id = ProductAccountId::new("001");

        let mut changes = product("other", "Product One");
        changes.minimum_balance = 500;
        changes.accepts_checks = true;
        let updated = service.update(&id, changes).await.unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.name, "Product One");
        assert_eq!(updated.minimum_balance, 500);
        assert!(updated.accepts_checks);
        assert_eq!(updated.creation_date, created.creation_date);
    }

    #[tokio::test]
    async fn test_product_account_inactivate_and_list_actives() {
        let service = ProductAccountService::new(MockRepo::new());
        service.create(product("001", "P1")).await.unwrap();
        service.create(product("002", "P2")).await.unwrap();

        service
            .inactivate(&ProductAccountId::new("001"))
            .await
            .unwrap();

        let actives = service.list_all_actives().await.unwrap();
        assert_eq!(actives.len(), 1);
        assert_eq!(actives[0].name, "P2");

        let stored = service
            .obtain_by_id(&ProductAccountId::new("001"))
            .await
            .unwrap();
        assert_eq!(stored.state, State::Inactive);
    }

    #[tokio::test]
    async fn test_product_account_update_unknown_id() {
        let service = ProductAccountService::new(MockRepo::new());

        let err = service
            .update(&ProductAccountId::new("nope"), product("nope", "X"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), 520);
        assert_eq!(
            err.message(),
            "Product Account cannot be updated, error:Product Account with id: {nope} does not exist"
        );
    }
}
