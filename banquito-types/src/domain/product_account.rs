//! Product account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::state::State;
use crate::error::DomainError;

/// Identifier of a ProductAccount.
///
/// Clients may choose it (e.g. `"001"`); otherwise the store assigns a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProductAccountId(String);

impl ProductAccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a random identifier for records saved without one.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductAccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product offered on accounts (savings, checking...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAccount {
    pub id: Option<ProductAccountId>,
    pub name: String,
    pub description: String,
    /// Minimum balance in smallest currency unit (cents)
    pub minimum_balance: i64,
    pub pay_interest: bool,
    pub accepts_checks: bool,
    pub state: State,
    /// Stamped by the service on creation
    pub creation_date: Option<DateTime<Utc>>,
}

impl ProductAccount {
    /// Display name used in error messages.
    pub const ENTITY: &'static str = "Product Account";

    /// Creates an unsaved product account.
    ///
    /// # Validation
    /// - A client-chosen id cannot be blank
    /// - Name cannot be blank
    /// - Minimum balance cannot be negative
    pub fn new(
        id: Option<ProductAccountId>,
        name: String,
        description: String,
        minimum_balance: i64,
        pay_interest: bool,
        accepts_checks: bool,
        state: State,
    ) -> Result<Self, DomainError> {
        if id.as_ref().is_some_and(|id| id.as_str().trim().is_empty()) {
            return Err(DomainError::EmptyField("Product account id"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("Product account name"));
        }
        if minimum_balance < 0 {
            return Err(DomainError::NegativeAmount);
        }

        Ok(Self {
            id,
            name,
            description,
            minimum_balance,
            pay_interest,
            accepts_checks,
            state,
            creation_date: None,
        })
    }

    /// Fills the fields the service owns on creation.
    pub fn stamp_defaults(&mut self, now: DateTime<Utc>) {
        self.creation_date = Some(now);
    }

    /// Copies the mutable fields of `changes` onto this record.
    /// Identity, state and creation date are preserved.
    pub fn overwrite_with(&mut self, changes: ProductAccount) {
        self.name = changes.name;
        self.description = changes.description;
        self.minimum_balance = changes.minimum_balance;
        self.pay_interest = changes.pay_interest;
        self.accepts_checks = changes.accepts_checks;
    }

    /// Moves the record to `INA`. Returns `false` when it was already inactive.
    pub fn inactivate(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.state = State::Inactive;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProductAccount {
        ProductAccount::new(
            Some(ProductAccountId::new("001")),
            "Product1".into(),
            "Product 1 description".into(),
            10_000,
            true,
            false,
            State::Active,
        )
        .unwrap()
    }

    #[test]
    fn test_negative_minimum_balance_fails() {
        let result = ProductAccount::new(
            None,
            "Product1".into(),
            String::new(),
            -1,
            false,
            false,
            State::Active,
        );
        assert_eq!(result, Err(DomainError::NegativeAmount));
    }

    #[test]
    fn test_blank_id_fails() {
        let result = ProductAccount::new(
            Some(ProductAccountId::new("  ")),
            "Product1".into(),
            String::new(),
            0,
            false,
            false,
            State::Active,
        );
        assert_eq!(result, Err(DomainError::EmptyField("Product account id")));
    }

    #[test]
    fn test_stamp_defaults_sets_creation_date() {
        let mut account = sample();
        assert!(account.creation_date.is_none());
        let now = Utc::now();
        account.stamp_defaults(now);
        assert_eq!(account.creation_date, Some(now));
    }

    #[test]
    fn test_overwrite_preserves_identity_and_state() {
        let mut stored = sample();
        stored.stamp_defaults(Utc::now());
        let created = stored.creation_date;

        let mut changes = sample();
        changes.id = Some(ProductAccountId::new("999"));
        changes.name = "Renamed".into();
        changes.state = State::Inactive;

        stored.overwrite_with(changes);

        assert_eq!(stored.id, Some(ProductAccountId::new("001")));
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.state, State::Active);
        assert_eq!(stored.creation_date, created);
    }

    #[test]
    fn test_inactivate() {
        let mut account = sample();
        assert!(account.inactivate());
        assert!(!account.inactivate());
        assert_eq!(account.state, State::Inactive);
    }
}
