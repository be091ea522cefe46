//! Role-permission model, authentication and the audit trail.
pub mod audit;
pub mod role;
pub mod session;
