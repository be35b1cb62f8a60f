//! Record state flag shared by the catalogs that soft-delete.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Lifecycle flag of a catalog record.
///
/// Transitions are one-directional: `ACT -> INA`. There is no reactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum State {
    #[default]
    #[serde(rename = "ACT")]
    Active,
    #[serde(rename = "INA")]
    Inactive,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Active => "ACT",
            State::Inactive => "INA",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, State::Active)
    }
}

impl AsRef<str> for State {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for State {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACT" => Ok(State::Active),
            "INA" => Ok(State::Inactive),
            other => Err(DomainError::UnknownState(other.to_string())),
        }
    }
}
