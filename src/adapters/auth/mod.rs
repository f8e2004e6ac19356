//! TokenVerifier adapters.
//!
//! `JwtTokenVerifier` validates HS256 bearer tokens in production;
//! `MockTokenVerifier` backs tests.

mod jwt;
mod mock;

pub use jwt::{Claims, JwtTokenVerifier};
pub use mock::MockTokenVerifier;
