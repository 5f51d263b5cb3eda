//! # FilmMe Infrastructure
//!
//! Concrete implementations of the ports defined in `filmme-core`:
//! PostgreSQL repositories, the in-memory store, and the JWT/Argon2 auth
//! services.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL support via SeaORM
//! - `minimal` - no database driver, in-memory store only

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, DatabaseConnections, InMemoryStore};
