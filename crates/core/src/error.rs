use std::path::PathBuf;

use thiserror::Error;

use crate::auth::role::Capability;

/// A payload or edit that cannot be applied to the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("username {0:?} is already taken")]
    DuplicateUsername(String),
    #[error("category {0:?} already exists")]
    DuplicateCategory(String),
    #[error("unknown role {0:?}")]
    UnknownRole(String),
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    #[error("price must be a finite, non-negative number")]
    InvalidPrice,
    #[error("reorder list must name every existing id exactly once")]
    ReorderMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("missing capability {0}")]
    Forbidden(Capability),
    #[error("account {0:?} cannot be deleted")]
    ProtectedAccount(String),
}

/// Failure of the durable copy. The in-memory document is unaffected.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Error of an admin mutation.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{kind} {id:?} not found")]
    NotFound { kind: &'static str, id: String },
}

impl OperationError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        OperationError::NotFound {
            kind,
            id: id.into(),
        }
    }
}
