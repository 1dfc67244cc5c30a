//! # Quill Shared
//!
//! Wire types shared between the API server and the article view client.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
