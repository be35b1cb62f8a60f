//! Branch domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;

/// Store-assigned identifier of a Branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BranchId(Uuid);

impl BranchId {
    /// Creates a new random BranchId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a BranchId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for BranchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BranchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BranchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A bank branch, addressed by its business `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// `None` until the store has persisted the record
    pub id: Option<BranchId>,
    /// Client-supplied business key
    pub code: String,
    pub name: String,
}

impl Branch {
    /// Display name used in error messages.
    pub const ENTITY: &'static str = "Branch";

    /// Creates an unsaved branch.
    ///
    /// # Validation
    /// - Code and name cannot be blank
    pub fn new(code: String, name: String) -> Result<Self, DomainError> {
        if code.trim().is_empty() {
            return Err(DomainError::EmptyField("Branch code"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("Branch name"));
        }

        Ok(Self {
            id: None,
            code,
            name,
        })
    }

    /// Creates a branch with all fields specified (for database reconstruction).
    pub fn from_parts(id: BranchId, code: String, name: String) -> Self {
        Self {
            id: Some(id),
            code,
            name,
        }
    }

    /// Copies the mutable fields of `changes` onto this record.
    /// `id` and `code` are left untouched.
    pub fn overwrite_with(&mut self, changes: Branch) {
        self.name = changes.name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_creation() {
        let branch = Branch::new("001".into(), "Branch 1".into()).unwrap();
        assert_eq!(branch.code, "001");
        assert!(branch.id.is_none());
    }

    #[test]
    fn test_blank_code_fails() {
        let result = Branch::new("  ".into(), "Branch 1".into());
        assert_eq!(result, Err(DomainError::EmptyField("Branch code")));
    }

    #[test]
    fn test_overwrite_keeps_identity() {
        let id = BranchId::new();
        let mut stored = Branch::from_parts(id, "001".into(), "Branch 1".into());
        let changes = Branch::new("XYZ".into(), "Updated Branch 1".into()).unwrap();

        stored.overwrite_with(changes);

        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.code, "001");
        assert_eq!(stored.name, "Updated Branch 1");
    }
}
