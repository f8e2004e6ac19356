//! Domain layer.
//!
//! Pure business logic with no adapter or framework dependencies.

pub mod foundation;
pub mod session;
