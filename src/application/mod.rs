//! Application layer.
//!
//! Command handlers that orchestrate the domain aggregates through the
//! ports. No HTTP or storage specifics live here.

pub mod handlers;
