//! Error types for the catalog services.

use std::fmt;

/// Domain-level errors (entity construction and validation).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Interest rate cannot be negative")]
    NegativeRate,

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Validity end {end} precedes start {start}")]
    InvalidValidity { start: String, end: String },
}

/// Repository-level errors (data access failures).
///
/// The display text of the store variants is the bare cause message, because
/// the service layer embeds it verbatim into [`CrudError`] messages.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Conflict(String),
}

/// The numeric-code error every catalog service reports.
///
/// Carries the code the HTTP adapter turns into a status and the
/// human-readable message shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CrudError {
    code: u16,
    message: String,
}

impl CrudError {
    pub const NOT_FOUND: u16 = 404;
    pub const READ_FAILED: u16 = 500;
    pub const CREATE_FAILED: u16 = 510;
    pub const UPDATE_FAILED: u16 = 520;
    pub const INACTIVATE_FAILED: u16 = 530;

    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// `<Entity> with id: {<id>} does not exist`, code 404.
    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::new(
            Self::NOT_FOUND,
            format!("{entity} with id: {{{id}}} does not exist"),
        )
    }

    /// `<Entity> with code: {<code>} does not exist`, code 404.
    pub fn code_not_found(entity: &str, code: &str) -> Self {
        Self::new(
            Self::NOT_FOUND,
            format!("{entity} with code: {{{code}}} does not exist"),
        )
    }

    /// A store failure on a read path, code 500.
    pub fn read_failed(entity: &str, cause: impl fmt::Display) -> Self {
        Self::new(
            Self::READ_FAILED,
            format!("{entity} cannot be retrieved, error:{cause}"),
        )
    }

    pub fn create_failed(entity: &str, cause: impl fmt::Display) -> Self {
        Self::new(
            Self::CREATE_FAILED,
            format!("{entity} cannot be created, error:{cause}"),
        )
    }

    pub fn update_failed(entity: &str, cause: impl fmt::Display) -> Self {
        Self::new(
            Self::UPDATE_FAILED,
            format!("{entity} cannot be updated, error:{cause}"),
        )
    }

    pub fn inactivate_failed(entity: &str, cause: impl fmt::Display) -> Self {
        Self::new(
            Self::INACTIVATE_FAILED,
            format!("{entity} cannot be inactivated, error:{cause}"),
        )
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
