pub mod cache;
pub mod cors;
pub mod request_tracing;
