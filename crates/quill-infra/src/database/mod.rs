//! PostgreSQL persistence via SeaORM.

mod connections;
pub mod entity;
mod repos;

pub use connections::DatabaseConfig;
pub use repos::{PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
