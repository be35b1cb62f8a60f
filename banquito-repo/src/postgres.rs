//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use banquito_types::{
    Branch, BranchId, BranchRepository, InterestRate, InterestRateId, InterestRateRepository,
    ProductAccount, ProductAccountId, ProductAccountRepository, RepoError, State,
};

use crate::types::{PgBranchRow, PgInterestRateRow, PgProductAccountRow, map_db_err};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository for the three catalogs.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_catalog_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Branches
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl BranchRepository for PostgresRepo {
    async fn list_branches(&self) -> Result<Vec<Branch>, RepoError> {
        let rows: Vec<PgBranchRow> =
            sqlx::query_as(r#"SELECT id, code, name FROM branches ORDER BY seq"#)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(rows.into_iter().map(PgBranchRow::into_domain).collect())
    }

    async fn find_branch_by_id(&self, id: BranchId) -> Result<Option<Branch>, RepoError> {
        let row: Option<PgBranchRow> =
            sqlx::query_as(r#"SELECT id, code, name FROM branches WHERE id = $1"#)
                .bind(id.into_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(row.map(PgBranchRow::into_domain))
    }

    async fn find_branch_by_code(&self, code: &str) -> Result<Option<Branch>, RepoError> {
        let row: Option<PgBranchRow> =
            sqlx::query_as(r#"SELECT id, code, name FROM branches WHERE code = $1"#)
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(row.map(PgBranchRow::into_domain))
    }

    async fn save_branch(&self, branch: Branch) -> Result<Branch, RepoError> {
        let id = branch.id.unwrap_or_default();

        sqlx::query(
            r#"INSERT INTO branches (id, code, name) VALUES ($1, $2, $3)
               ON CONFLICT (id) DO UPDATE SET code = EXCLUDED.code, name = EXCLUDED.name"#,
        )
        .bind(id.into_uuid())
        .bind(&branch.code)
        .bind(&branch.name)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(Branch::from_parts(id, branch.code, branch.name))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interest rates
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl InterestRateRepository for PostgresRepo {
    async fn list_interest_rates(&self) -> Result<Vec<InterestRate>, RepoError> {
        let rows: Vec<PgInterestRateRow> = sqlx::query_as(
            r#"SELECT id, name, rate_bps, state, start_date, end_date FROM interest_rates ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(PgInterestRateRow::into_domain).collect()
    }

    async fn find_interest_rate_by_id(
        &self,
        id: InterestRateId,
    ) -> Result<Option<InterestRate>, RepoError> {
        let row: Option<PgInterestRateRow> = sqlx::query_as(
            r#"SELECT id, name, rate_bps, state, start_date, end_date FROM interest_rates WHERE id = $1"#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(PgInterestRateRow::into_domain).transpose()
    }

    async fn find_interest_rates_by_state(
        &self,
        state: State,
    ) -> Result<Vec<InterestRate>, RepoError> {
        let rows: Vec<PgInterestRateRow> = sqlx::query_as(
            r#"SELECT id, name, rate_bps, state, start_date, end_date FROM interest_rates
               WHERE state = $1 ORDER BY id"#,
        )
        .bind(state.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(PgInterestRateRow::into_domain).collect()
    }

    async fn save_interest_rate(&self, rate: InterestRate) -> Result<InterestRate, RepoError> {
        let start = rate.start.unwrap_or_else(Utc::now);

        let id: i64 = match rate.id {
            None => sqlx::query_scalar(
                r#"INSERT INTO interest_rates (name, rate_bps, state, start_date, end_date)
                   VALUES ($1, $2, $3, $4, $5) RETURNING id"#,
            )
            .bind(&rate.name)
            .bind(rate.rate.basis_points())
            .bind(rate.state.as_str())
            .bind(start)
            .bind(rate.end)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)?,
            Some(id) => sqlx::query_scalar(
                r#"INSERT INTO interest_rates (id, name, rate_bps, state, start_date, end_date)
                   VALUES ($1, $2, $3, $4, $5, $6)
                   ON CONFLICT (id) DO UPDATE SET
                       name = EXCLUDED.name,
                       rate_bps = EXCLUDED.rate_bps,
                       state = EXCLUDED.state,
                       start_date = EXCLUDED.start_date,
                       end_date = EXCLUDED.end_date
                   RETURNING id"#,
            )
            .bind(id.value())
            .bind(&rate.name)
            .bind(rate.rate.basis_points())
            .bind(rate.state.as_str())
            .bind(start)
            .bind(rate.end)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)?,
        };

        Ok(InterestRate::from_parts(
            InterestRateId::new(id),
            rate.name,
            rate.rate,
            rate.state,
            start,
            rate.end,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Product accounts
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ProductAccountRepository for PostgresRepo {
    async fn list_product_accounts(&self) -> Result<Vec<ProductAccount>, RepoError> {
        let rows: Vec<PgProductAccountRow> = sqlx::query_as(
            r#"SELECT id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date
               FROM product_accounts ORDER BY seq"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(PgProductAccountRow::into_domain).collect()
    }

    async fn find_product_account_by_id(
        &self,
        id: &ProductAccountId,
    ) -> Result<Option<ProductAccount>, RepoError> {
        let row: Option<PgProductAccountRow> = sqlx::query_as(
            r#"SELECT id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date
               FROM product_accounts WHERE id = $1"#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(PgProductAccountRow::into_domain).transpose()
    }

    async fn find_product_accounts_by_state(
        &self,
        state: State,
    ) -> Result<Vec<ProductAccount>, RepoError> {
        let rows: Vec<PgProductAccountRow> = sqlx::query_as(
            r#"SELECT id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date
               FROM product_accounts WHERE state = $1 ORDER BY seq"#,
        )
        .bind(state.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(PgProductAccountRow::into_domain).collect()
    }

    async fn save_product_account(
        &self,
        account: ProductAccount,
    ) -> Result<ProductAccount, RepoError> {
        let id = account.id.clone().unwrap_or_else(ProductAccountId::generate);
        let creation_date = account.creation_date.unwrap_or_else(Utc::now);

        // The stored creation_date wins on conflict, so the row is read back.
        let row: PgProductAccountRow = sqlx::query_as(
            r#"INSERT INTO product_accounts
                   (id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               ON CONFLICT (id) DO UPDATE SET
                   name = EXCLUDED.name,
                   description = EXCLUDED.description,
                   minimum_balance = EXCLUDED.minimum_balance,
                   pay_interest = EXCLUDED.pay_interest,
                   accepts_checks = EXCLUDED.accepts_checks,
                   state = EXCLUDED.state
               RETURNING id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date"#,
        )
        .bind(id.as_str())
        .bind(&account.name)
        .bind(&account.description)
        .bind(account.minimum_balance)
        .bind(account.pay_interest)
        .bind(account.accepts_checks)
        .bind(account.state.as_str())
        .bind(creation_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.into_domain()
    }
}
