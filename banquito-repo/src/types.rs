//! Database row types and their conversion to domain entities.
//!
//! SQLite stores UUIDs and timestamps as TEXT and booleans as INTEGER;
//! PostgreSQL uses native types. Each backend gets its own row structs so
//! both adapters can be compiled side by side.

use banquito_types::{RepoError, State};

// ─────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a driver error onto the repository taxonomy.
///
/// Unique-key violations (duplicate branch code, duplicate product id)
/// become [`RepoError::Conflict`]; everything else is a generic store error.
pub fn map_db_err(err: sqlx::Error) -> RepoError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => RepoError::Conflict(db.message().to_string()),
        _ => RepoError::Database(err.to_string()),
    }
}

pub fn parse_state(s: &str) -> Result<State, RepoError> {
    s.parse::<State>().map_err(RepoError::Domain)
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
pub use sqlite_rows::*;

#[cfg(feature = "sqlite")]
mod sqlite_rows {
    use banquito_types::{
        Branch, BranchId, InterestRate, InterestRateId, ProductAccount, ProductAccountId, Rate,
        RepoError,
    };
    use chrono::{DateTime, Utc};
    use sqlx::FromRow;

    use super::parse_state;

    fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, RepoError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RepoError::Database(e.to_string()))
    }

    /// Branch row from SQLite.
    #[derive(FromRow)]
    pub struct SqliteBranchRow {
        pub id: String,
        pub code: String,
        pub name: String,
    }

    impl SqliteBranchRow {
        pub fn into_domain(self) -> Result<Branch, RepoError> {
            let id: BranchId = self
                .id
                .parse()
                .map_err(|e: uuid::Error| RepoError::Database(e.to_string()))?;
            Ok(Branch::from_parts(id, self.code, self.name))
        }
    }

    /// Interest rate row from SQLite.
    #[derive(FromRow)]
    pub struct SqliteInterestRateRow {
        pub id: i64,
        pub name: String,
        pub rate_bps: i64,
        pub state: String,
        pub start_date: String,
        pub end_date: Option<String>,
    }

    impl SqliteInterestRateRow {
        pub fn into_domain(self) -> Result<InterestRate, RepoError> {
            let end = self.end_date.as_deref().map(parse_timestamp).transpose()?;
            Ok(InterestRate::from_parts(
                InterestRateId::new(self.id),
                self.name,
                Rate::from_basis_points(self.rate_bps)?,
                parse_state(&self.state)?,
                parse_timestamp(&self.start_date)?,
                end,
            ))
        }
    }

    /// Product account row from SQLite.
    #[derive(FromRow)]
    pub struct SqliteProductAccountRow {
        pub id: String,
        pub name: String,
        pub description: String,
        pub minimum_balance: i64,
        pub pay_interest: i64,
        pub accepts_checks: i64,
        pub state: String,
        pub creation_date: String,
    }

    impl SqliteProductAccountRow {
        pub fn into_domain(self) -> Result<ProductAccount, RepoError> {
            Ok(ProductAccount {
                id: Some(ProductAccountId::new(self.id)),
                name: self.name,
                description: self.description,
                minimum_balance: self.minimum_balance,
                pay_interest: self.pay_interest != 0,
                accepts_checks: self.accepts_checks != 0,
                state: parse_state(&self.state)?,
                creation_date: Some(parse_timestamp(&self.creation_date)?),
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "postgres")]
pub use pg_rows::*;

#[cfg(feature = "postgres")]
mod pg_rows {
    use banquito_types::{
        Branch, BranchId, InterestRate, InterestRateId, ProductAccount, ProductAccountId, Rate,
        RepoError,
    };
    use chrono::{DateTime, Utc};
    use sqlx::FromRow;
    use uuid::Uuid;

    use super::parse_state;

    /// Branch row from PostgreSQL.
    #[derive(FromRow)]
    pub struct PgBranchRow {
        pub id: Uuid,
        pub code: String,
        pub name: String,
    }

    impl PgBranchRow {
        pub fn into_domain(self) -> Branch {
            Branch::from_parts(BranchId::from_uuid(self.id), self.code, self.name)
        }
    }

    /// Interest rate row from PostgreSQL.
    #[derive(FromRow)]
    pub struct PgInterestRateRow {
        pub id: i64,
        pub name: String,
        pub rate_bps: i64,
        pub state: String,
        pub start_date: DateTime<Utc>,
        pub end_date: Option<DateTime<Utc>>,
    }

    impl PgInterestRateRow {
        pub fn into_domain(self) -> Result<InterestRate, RepoError> {
            Ok(InterestRate::from_parts(
                InterestRateId::new(self.id),
                self.name,
                Rate::from_basis_points(self.rate_bps)?,
                parse_state(&self.state)?,
                self.start_date,
                self.end_date,
            ))
        }
    }

    /// Product account row from PostgreSQL.
    #[derive(FromRow)]
    pub struct PgProductAccountRow {
        pub id: String,
        pub name: String,
        pub description: String,
        pub minimum_balance: i64,
        pub pay_interest: bool,
        pub accepts_checks: bool,
        pub state: String,
        pub creation_date: DateTime<Utc>,
    }

    impl PgProductAccountRow {
        pub fn into_domain(self) -> Result<ProductAccount, RepoError> {
            Ok(ProductAccount {
                id: Some(ProductAccountId::new(self.id)),
                name: self.name,
                description: self.description,
                minimum_balance: self.minimum_balance,
                pay_interest: self.pay_interest,
                accepts_checks: self.accepts_checks,
                state: parse_state(&self.state)?,
                creation_date: Some(self.creation_date),
            })
        }
    }
}
