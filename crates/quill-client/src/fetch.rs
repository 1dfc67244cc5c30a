//! HTTP fetch client for the article API.

use quill_shared::dto::PostDetailResponse;
use quill_shared::response::ApiResponse;

/// Errors a fetch can surface to the view.
///
/// Kept cloneable so the view state can carry one; transport errors are
/// flattened to their display form.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("article not found")]
    NotFound,

    #[error("server returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

/// Thin wrapper over reqwest targeting one API base URL.
#[derive(Debug, Clone)]
pub struct ArticleClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArticleClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Base URL from `QUILL_API_BASE`, defaulting to a local server.
    pub fn from_env() -> Self {
        let base =
            std::env::var("QUILL_API_BASE").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
        Self::new(base)
    }

    /// Fetch one post with its comments.
    pub async fn fetch_post(&self, article_id: i64) -> Result<PostDetailResponse, FetchError> {
        let url = format!("{}/api/posts/{}", self.base_url, article_id);
        tracing::debug!(%url, "fetching article");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope: ApiResponse<PostDetailResponse> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| FetchError::Malformed("success envelope without data".to_string()))
    }
}
