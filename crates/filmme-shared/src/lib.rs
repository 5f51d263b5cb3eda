//! # FilmMe Shared
//!
//! Wire types of the community API, shared between the server and clients.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, Paginated};
