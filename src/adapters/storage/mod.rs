//! Session storage adapters.
//!
//! `PostgresSessionRepository` is the production store;
//! `InMemorySessionRepository` backs tests and database-less runs.
//! Both enforce the same version-checked update semantics.

mod in_memory_session_repository;
mod postgres_session_repository;

pub use in_memory_session_repository::InMemorySessionRepository;
pub use postgres_session_repository::PostgresSessionRepository;
