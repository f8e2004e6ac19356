//! Inbound HTTP adapters.

pub mod middleware;
pub mod session;
