//! # Recipe API
//!
//! HTTP handlers, extractors, DTOs and the router with its middleware pipeline.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
