//! REST boundary: query binding, DTOs, handlers and error mapping.
//!
//! Transport is not part of this crate. Handlers take already-routed
//! arguments (path ids, the raw query string, typed bodies) and produce
//! `http::Response<serde_json::Value>` values.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod params;
pub mod response;
pub mod root;

pub use handlers::TournamentApi;
pub use response::{ApiResponse, ApiResult};
