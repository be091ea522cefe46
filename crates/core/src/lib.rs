//! Core of the menu panel: the persisted site document, the migration that
//! upgrades older document shapes, the role-permission model with its audit
//! log, the admin mutations built on top of both, and the file-backed store.

pub mod auth;
pub mod document;
pub mod error;
pub mod migrate;
pub mod mutation;
pub mod store;

pub use auth::role::{Capability, Role};
pub use auth::session::Session;
pub use document::model::Document;
pub use error::{AuthError, OperationError, StorageError, ValidationError};
pub use migrate::normalize;
pub use store::DocumentStore;
