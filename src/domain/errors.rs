//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Parsing in the domain layer
//! never produces one.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Chat provider error: {0}")]
    Chat(String),

    /// Provider rejected the call because the token lacks a scope.
    /// Callers downgrade this to a warning flag instead of aborting.
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Profile lookup failed: {0}")]
    Profile(String),

    #[error("Spreadsheet write failed: {0}")]
    Sink(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl DomainError {
    pub fn is_missing_permission(&self) -> bool {
        matches!(self, DomainError::MissingPermission(_))
    }
}
