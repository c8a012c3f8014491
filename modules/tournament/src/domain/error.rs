use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Team not found: {id}")]
    TeamNotFound { id: Uuid },

    #[error("Group not found: {id}")]
    GroupNotFound { id: Uuid },

    #[error("Team name '{name}' is already taken")]
    TeamNameTaken { name: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Projection(#[from] ft_projection::Error),
}

impl DomainError {
    #[must_use]
    pub fn team_not_found(id: Uuid) -> Self {
        Self::TeamNotFound { id }
    }

    #[must_use]
    pub fn group_not_found(id: Uuid) -> Self {
        Self::GroupNotFound { id }
    }

    #[must_use]
    pub fn team_name_taken(name: impl Into<String>) -> Self {
        Self::TeamNameTaken { name: name.into() }
    }

    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
