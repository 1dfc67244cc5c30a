//! In-memory repository implementations - used as fallback when the
//! database is not configured, and as the substrate for service tests.

mod memory;

pub use memory::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(test)]
mod tests;
