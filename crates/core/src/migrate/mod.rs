//! Upgrade of stored documents to the current schema.
pub mod legacy;
mod upgrade;

pub use upgrade::normalize;
