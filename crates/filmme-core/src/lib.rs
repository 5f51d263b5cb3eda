//! # FilmMe Core
//!
//! The domain layer of the FilmMe community board.
//! Entities, ports and the community use cases live here, with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::CommunityService;
