//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use banquito_types::{
        Branch, BranchId, BranchRepository, InterestRate, InterestRateId, InterestRateRepository,
        ProductAccount, ProductAccountId, ProductAccountRepository, Rate, RepoError, State,
    };
    use chrono::{TimeZone, Utc};

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn rate(name: &str, bps: i64, state: State) -> InterestRate {
        InterestRate::new(
            name.to_string(),
            Rate::from_basis_points(bps).unwrap(),
            state,
            None,
            None,
        )
        .unwrap()
    }

    fn product(id: Option<&str>, name: &str, state: State) -> ProductAccount {
        ProductAccount::new(
            id.map(ProductAccountId::new),
            name.to_string(),
            format!("{name} description"),
            10_000,
            true,
            false,
            state,
        )
        .unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Branches
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_branch_assigns_id() {
        let repo = setup_repo().await;

        let saved = repo
            .save_branch(Branch::new("001".into(), "Branch 1".into()).unwrap())
            .await
            .unwrap();

        let id = saved.id.unwrap();
        let fetched = repo.find_branch_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_find_branch_by_code() {
        let repo = setup_repo().await;
        repo.save_branch(Branch::new("001".into(), "Branch 1".into()).unwrap())
            .await
            .unwrap();

        let found = repo.find_branch_by_code("001").await.unwrap().unwrap();
        assert_eq!(found.name, "Branch 1");

        assert!(repo.find_branch_by_code("999").await.unwrap().is_none());
        assert!(
            repo.find_branch_by_id(BranchId::new())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_save_branch_with_id_updates_in_place() {
        let repo = setup_repo().await;
        let mut saved = repo
            .save_branch(Branch::new("001".into(), "Branch 1".into()).unwrap())
            .await
            .unwrap();

        saved.name = "Renamed".into();
        repo.save_branch(saved.clone()).await.unwrap();

        let all = repo.list_branches().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Renamed");
        assert_eq!(all[0].id, saved.id);
    }

    #[tokio::test]
    async fn test_list_branches_in_insertion_order() {
        let repo = setup_repo().await;
        for (code, name) in [("003", "C"), ("001", "A"), ("002", "B")] {
            repo.save_branch(Branch::new(code.into(), name.into()).unwrap())
                .await
                .unwrap();
        }

        let codes: Vec<String> = repo
            .list_branches()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.code)
            .collect();
        assert_eq!(codes, vec!["003", "001", "002"]);
    }

    #[tokio::test]
    async fn test_duplicate_branch_code_is_conflict() {
        let repo = setup_repo().await;
        repo.save_branch(Branch::new("001".into(), "Branch 1".into()).unwrap())
            .await
            .unwrap();

        let result = repo
            .save_branch(Branch::new("001".into(), "Other".into()).unwrap())
            .await;

        assert!(matches!(result, Err(RepoError::Conflict(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Interest rates
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_interest_rate_assigns_sequential_ids() {
        let repo = setup_repo().await;

        let first = repo
            .save_interest_rate(rate("Savings", 250, State::Active))
            .await
            .unwrap();
        let second = repo
            .save_interest_rate(rate("Term", 500, State::Active))
            .await
            .unwrap();

        assert_eq!(first.id, Some(InterestRateId::new(1)));
        assert_eq!(second.id, Some(InterestRateId::new(2)));
        assert!(first.start.is_some());
    }

    #[tokio::test]
    async fn test_interest_rate_timestamps_survive_storage() {
        let repo = setup_repo().await;
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let input = InterestRate::new(
            "Savings".into(),
            Rate::from_basis_points(250).unwrap(),
            State::Active,
            Some(start),
            Some(end),
        )
        .unwrap();

        let saved = repo.save_interest_rate(input).await.unwrap();
        let fetched = repo
            .find_interest_rate_by_id(saved.id.unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.start, Some(start));
        assert_eq!(fetched.end, Some(end));
        assert_eq!(fetched.rate.to_string(), "0.0250");
    }

    #[tokio::test]
    async fn test_find_interest_rates_by_state() {
        let repo = setup_repo().await;
        repo.save_interest_rate(rate("A", 100, State::Active))
            .await
            .unwrap();
        repo.save_interest_rate(rate("B", 200, State::Inactive))
            .await
            .unwrap();
        repo.save_interest_rate(rate("C", 300, State::Active))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .find_interest_rates_by_state(State::Active)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(repo.list_interest_rates().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_resave_interest_rate_overwrites() {
        let repo = setup_repo().await;
        let mut saved = repo
            .save_interest_rate(rate("Savings", 250, State::Active))
            .await
            .unwrap();

        let now = Utc::now();
        assert!(saved.inactivate(now));
        repo.save_interest_rate(saved.clone()).await.unwrap();

        let fetched = repo
            .find_interest_rate_by_id(saved.id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.state, State::Inactive);
        assert!(fetched.end.is_some());
        assert!(
            repo.find_interest_rates_by_state(State::Active)
                .await
                .unwrap()
                .is_empty()
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Product accounts
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_product_account_keeps_client_id() {
        let repo = setup_repo().await;

        let saved = repo
            .save_product_account(product(Some("001"), "Product1", State::Active))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(ProductAccountId::new("001")));
        let fetched = repo
            .find_product_account_by_id(&ProductAccountId::new("001"))
            .await
            .unwrap()
            .unwrap();
        assert!(fetched.pay_interest);
        assert!(!fetched.accepts_checks);
        assert_eq!(fetched.minimum_balance, 10_000);
        assert!(fetched.creation_date.is_some());
    }

    #[tokio::test]
    async fn test_save_product_account_generates_missing_id() {
        let repo = setup_repo().await;

        let saved = repo
            .save_product_account(product(None, "Product1", State::Active))
            .await
            .unwrap();

        let id = saved.id.unwrap();
        assert!(!id.as_str().is_empty());
        assert!(
            repo.find_product_account_by_id(&id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_product_account_creation_date_is_kept_on_resave() {
        let repo = setup_repo().await;
        let saved = repo
            .save_product_account(product(Some("001"), "Product1", State::Active))
            .await
            .unwrap();

        let mut changed = saved.clone();
        changed.name = "Renamed".into();
        changed.creation_date = Some(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
        let resaved = repo.save_product_account(changed).await.unwrap();

        let fetched = repo
            .find_product_account_by_id(&ProductAccountId::new("001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "Renamed");
        assert_eq!(fetched.creation_date, saved.creation_date);
        assert_eq!(resaved.creation_date, fetched.creation_date);
        assert_eq!(resaved.name, "Renamed");
    }

    #[tokio::test]
    async fn test_resave_returns_stored_creation_date() {
        let repo = setup_repo().await;
        let original = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        let mut first = product(Some("001"), "Product1", State::Active);
        first.creation_date = Some(original);
        repo.save_product_account(first).await.unwrap();

        let mut second = product(Some("001"), "Product1", State::Active);
        second.creation_date = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let returned = repo.save_product_account(second).await.unwrap();

        assert_eq!(returned.creation_date, Some(original));
    }

    #[tokio::test]
    async fn test_find_product_accounts_by_state() {
        let repo = setup_repo().await;
        repo.save_product_account(product(Some("001"), "P1", State::Active))
            .await
            .unwrap();
        repo.save_product_account(product(Some("002"), "P2", State::Inactive))
            .await
            .unwrap();

        let active = repo
            .find_product_accounts_by_state(State::Active)
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "P1");

        let inactive = repo
            .find_product_accounts_by_state(State::Inactive)
            .await
            .unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(repo.list_product_accounts().await.unwrap().len(), 2);
    }
}
