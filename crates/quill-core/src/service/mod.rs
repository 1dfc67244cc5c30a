//! Application services built on the ports.

mod decorate;
mod posts;

pub use decorate::{format_created_at, redact_author};
pub use posts::PostService;
