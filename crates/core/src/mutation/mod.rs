//! Admin panel edits. Each one checks the session's capabilities, applies the
//! change to the document and records an audit entry. Persisting the result
//! is up to the caller.
pub mod catalog;
pub mod document;
pub mod settings;
pub mod types;
pub mod users;
