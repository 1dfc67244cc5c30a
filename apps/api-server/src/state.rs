//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::UserRepository;
use quill_core::service::PostService;
use quill_infra::markdown::PulldownRenderer;
use quill_infra::repository::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository,
};

use crate::config::DatabaseSettings;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub users: Arc<dyn UserRepository>,
    /// Which repository backend this process runs on.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_settings: Option<&DatabaseSettings>) -> Self {
        let renderer = Arc::new(PulldownRenderer::new());

        #[cfg(feature = "postgres")]
        if let Some(settings) = db_settings {
            let config = quill_infra::database::DatabaseConfig {
                url: settings.url.clone(),
                max_connections: settings.max_connections,
                min_connections: settings.min_connections,
            };
            match config.connect().await {
                Ok(db) => {
                    use quill_infra::database::{
                        PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
                    };

                    let users: Arc<dyn UserRepository> =
                        Arc::new(PostgresUserRepository::new(db.clone()));
                    let service = PostService::new(
                        Arc::new(PostgresPostRepository::new(db.clone())),
                        Arc::new(PostgresCommentRepository::new(db.clone())),
                        users.clone(),
                        renderer,
                    );

                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        posts: Arc::new(service),
                        users,
                        storage: "postgres",
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_settings;
            tracing::info!("Running without postgres feature - using in-memory repositories");
        }

        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let service = PostService::new(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryCommentRepository::new()),
            users.clone(),
            renderer,
        );

        tracing::info!("Application state initialized (in-memory)");
        Self {
            posts: Arc::new(service),
            users,
            storage: "in-memory",
        }
    }
}
