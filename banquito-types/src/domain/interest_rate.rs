//! Interest rate domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::state::State;
use crate::error::DomainError;

/// Store-assigned (auto-increment) identifier of an InterestRate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct InterestRateId(i64);

impl InterestRateId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for InterestRateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InterestRateId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A non-negative rate in basis points of a unit (1/10 000).
///
/// `0.0250` is stored as `250`, which keeps the value exact without
/// floating-point arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rate(i64);

impl Rate {
    pub const SCALE: i64 = 10_000;

    pub fn from_basis_points(bps: i64) -> Result<Self, DomainError> {
        if bps < 0 {
            return Err(DomainError::NegativeRate);
        }
        Ok(Self(bps))
    }

    pub fn basis_points(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Rate {
    type Error = DomainError;

    fn try_from(bps: i64) -> Result<Self, Self::Error> {
        Self::from_basis_points(bps)
    }
}

impl From<Rate> for i64 {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:04}", self.0 / Self::SCALE, self.0 % Self::SCALE)
    }
}

/// A catalogued interest rate with its validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRate {
    /// `None` until the store has persisted the record
    pub id: Option<InterestRateId>,
    pub name: String,
    pub rate: Rate,
    pub state: State,
    /// Stamped with the creation time when left empty
    pub start: Option<DateTime<Utc>>,
    /// Stamped when the rate is inactivated
    pub end: Option<DateTime<Utc>>,
}

impl InterestRate {
    /// Display name used in error messages.
    pub const ENTITY: &'static str = "Interest Rate";

    /// Creates an unsaved interest rate.
    ///
    /// # Validation
    /// - Name cannot be blank
    /// - `end` cannot precede `start`
    pub fn new(
        name: String,
        rate: Rate,
        state: State,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("Interest rate name"));
        }
        check_validity(start, end)?;

        Ok(Self {
            id: None,
            name,
            rate,
            state,
            start,
            end,
        })
    }

    /// Creates an interest rate with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: InterestRateId,
        name: String,
        rate: Rate,
        state: State,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            rate,
            state,
            start: Some(start),
            end,
        }
    }

    /// Fills the fields the service owns on creation.
    pub fn stamp_defaults(&mut self, now: DateTime<Utc>) {
        if self.start.is_none() {
            self.start = Some(now);
        }
    }

    /// Copies the mutable fields of `changes` onto this record.
    ///
    /// Identity and state are preserved; state only moves through
    /// [`InterestRate::inactivate`]. An inactive record keeps its `end`
    /// stamp unless `changes` carries a new one.
    pub fn overwrite_with(&mut self, changes: InterestRate) -> Result<(), DomainError> {
        let start = changes.start.or(self.start);
        let end = if self.state.is_active() {
            changes.end
        } else {
            changes.end.or(self.end)
        };
        check_validity(start, end)?;

        self.name = changes.name;
        self.rate = changes.rate;
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Moves the record to `INA` and closes its validity window.
    /// Returns `false` when it was already inactive.
    pub fn inactivate(&mut self, at: DateTime<Utc>) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.state = State::Inactive;
        self.end = Some(at);
        true
    }
}

fn check_validity(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), DomainError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(DomainError::InvalidValidity {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        }),
        _ => Ok(()),
    }
}
