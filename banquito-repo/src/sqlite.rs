//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use banquito_types::{
    Branch, BranchId, BranchRepository, InterestRate, InterestRateId, InterestRateRepository,
    ProductAccount, ProductAccountId, ProductAccountRepository, RepoError, State,
};

use crate::types::{
    SqliteBranchRow, SqliteInterestRateRow, SqliteProductAccountRow, map_db_err,
};

const MIGRATION: &str = include_str!("../migrations/0001_create_catalog.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to an in-memory database is a fresh database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        for statement in MIGRATION.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt)
                    .execute(&self.pool)
                    .await
                    .map_err(map_db_err)?;
            }
        }
        tracing::debug!("sqlite schema ready");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Branches
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl BranchRepository for SqliteRepo {
    async fn list_branches(&self) -> Result<Vec<Branch>, RepoError> {
        let rows: Vec<SqliteBranchRow> =
            sqlx::query_as(r#"SELECT id, code, name FROM branches ORDER BY rowid"#)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_err)?;

        rows.into_iter().map(SqliteBranchRow::into_domain).collect()
    }

    async fn find_branch_by_id(&self, id: BranchId) -> Result<Option<Branch>, RepoError> {
        let row: Option<SqliteBranchRow> =
            sqlx::query_as(r#"SELECT id, code, name FROM branches WHERE id = ?"#)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        row.map(SqliteBranchRow::into_domain).transpose()
    }

    async fn find_branch_by_code(&self, code: &str) -> Result<Option<Branch>, RepoError> {
        let row: Option<SqliteBranchRow> =
            sqlx::query_as(r#"SELECT id, code, name FROM branches WHERE code = ?"#)
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        row.map(SqliteBranchRow::into_domain).transpose()
    }

    async fn save_branch(&self, branch: Branch) -> Result<Branch, RepoError> {
        let id = branch.id.unwrap_or_default();

        sqlx::query(
            r#"INSERT INTO branches (id, code, name) VALUES (?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET code = excluded.code, name = excluded.name"#,
        )
        .bind(id.to_string())
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
impl InterestRateRepository for SqliteRepo {
    async fn list_interest_rates(&self) -> Result<Vec<InterestRate>, RepoError> {
        let rows: Vec<SqliteInterestRateRow> = sqlx::query_as(
            r#"SELECT id, name, rate_bps, state, start_date, end_date FROM interest_rates ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(SqliteInterestRateRow::into_domain).collect()
    }

    async fn find_interest_rate_by_id(
        &self,
        id: InterestRateId,
    ) -> Result<Option<InterestRate>, RepoError> {
        let row: Option<SqliteInterestRateRow> = sqlx::query_as(
            r#"SELECT id, name, rate_bps, state, start_date, end_date FROM interest_rates WHERE id = ?"#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(SqliteInterestRateRow::into_domain).transpose()
    }

    async fn find_interest_rates_by_state(
        &self,
        state: State,
    ) -> Result<Vec<InterestRate>, RepoError> {
        let rows: Vec<SqliteInterestRateRow> = sqlx::query_as(
            r#"SELECT id, name, rate_bps, state, start_date, end_date FROM interest_rates
               WHERE state = ? ORDER BY id"#,
        )
        .bind(state.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(SqliteInterestRateRow::into_domain).collect()
    }

    async fn save_interest_rate(&self, rate: InterestRate) -> Result<InterestRate, RepoError> {
        let start = rate.start.unwrap_or_else(Utc::now);
        let end = rate.end.map(|dt| dt.to_rfc3339());

        let id = match rate.id {
            None => sqlx::query_scalar::<_, i64>(
                r#"INSERT INTO interest_rates (name, rate_bps, state, start_date, end_date)
                   VALUES (?, ?, ?, ?, ?) RETURNING id"#,
            )
            .bind(&rate.name)
            .bind(rate.rate.basis_points())
            .bind(rate.state.as_str())
            .bind(start.to_rfc3339())
            .bind(&end)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)?,
            Some(id) => {
                sqlx::query(
                    r#"INSERT INTO interest_rates (id, name, rate_bps, state, start_date, end_date)
                       VALUES (?, ?, ?, ?, ?, ?)
                       ON CONFLICT(id) DO UPDATE SET
                           name = excluded.name,
                           rate_bps = excluded.rate_bps,
                           state = excluded.state,
                           start_date = excluded.start_date,
                           end_date = excluded.end_date"#,
                )
                .bind(id.value())
                .bind(&rate.name)
                .bind(rate.rate.basis_points())
                .bind(rate.state.as_str())
                .bind(start.to_rfc3339())
                .bind(&end)
                .execute(&self.pool)
                .await
                .map_err(map_db_err)?;
                id.value()
            }
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
impl ProductAccountRepository for SqliteRepo {
    async fn list_product_accounts(&self) -> Result<Vec<ProductAccount>, RepoError> {
        let rows: Vec<SqliteProductAccountRow> = sqlx::query_as(
            r#"SELECT id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date
               FROM product_accounts ORDER BY rowid"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter()
            .map(SqliteProductAccountRow::into_domain)
            .collect()
    }

    async fn find_product_account_by_id(
        &self,
        id: &ProductAccountId,
    ) -> Result<Option<ProductAccount>, RepoError> {
        let row: Option<SqliteProductAccountRow> = sqlx::query_as(
            r#"SELECT id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date
               FROM product_accounts WHERE id = ?"#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(SqliteProductAccountRow::into_domain).transpose()
    }

    async fn find_product_accounts_by_state(
        &self,
        state: State,
    ) -> Result<Vec<ProductAccount>, RepoError> {
        let rows: Vec<SqliteProductAccountRow> = sqlx::query_as(
            r#"SELECT id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date
               FROM product_accounts WHERE state = ? ORDER BY rowid"#,
        )
        .bind(state.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter()
            .map(SqliteProductAccountRow::into_domain)
            .collect()
    }

    async fn save_product_account(
        &self,
        account: ProductAccount,
    ) -> Result<ProductAccount, RepoError> {
        let id = account.id.clone().unwrap_or_else(ProductAccountId::generate);
        let creation_date = account.creation_date.unwrap_or_else(Utc::now);

        // The stored creation_date wins on conflict, so the row is read back.
        let row: SqliteProductAccountRow = sqlx::query_as(
            r#"INSERT INTO product_accounts
                   (id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   name = excluded.name,
                   description = excluded.description,
                   minimum_balance = excluded.minimum_balance,
                   pay_interest = excluded.pay_interest,
                   accepts_checks = excluded.accepts_checks,
                   state = excluded.state
               RETURNING id, name, description, minimum_balance, pay_interest, accepts_checks, state, creation_date"#,
        )
        .bind(id.as_str())
        .bind(&account.name)
        .bind(&account.description)
        .bind(account.minimum_balance)
        .bind(account.pay_interest as i64)
        .bind(account.accepts_checks as i64)
        .bind(account.state.as_str())
        .bind(creation_date.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.into_domain()
    }
}
