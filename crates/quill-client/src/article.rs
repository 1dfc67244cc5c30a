//! Article view state machine.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use quill_shared::dto::{CommentDto, PostDetailResponse, PostDto};

use crate::fetch::{ArticleClient, FetchError};

/// What the view holds once the article arrived.
#[derive(Debug, Clone)]
pub struct LoadedArticle {
    pub article: PostDto,
    pub comments: Vec<CommentDto>,
    /// True when the logged-in user wrote this article.
    pub is_current_user_author: bool,
}

/// View lifecycle states.
///
/// A failed fetch lands in `Failed` rather than staying in `Loading`
/// forever; see DESIGN.md for the decision.
#[derive(Debug, Clone)]
pub enum ViewState {
    Loading,
    Loaded(LoadedArticle),
    Failed(FetchError),
}

impl ViewState {
    /// Pure transition applied to the fetch outcome.
    pub fn on_response(
        result: Result<PostDetailResponse, FetchError>,
        current_user: Option<Uuid>,
    ) -> ViewState {
        match result {
            Ok(detail) => {
                let is_current_user_author =
                    current_user.is_some_and(|user| user == detail.post.author.id);
                ViewState::Loaded(LoadedArticle {
                    article: detail.post,
                    comments: detail.comments,
                    is_current_user_author,
                })
            }
            Err(err) => ViewState::Failed(err),
        }
    }
}

/// Data handed to the article body renderer.
#[derive(Debug, Clone)]
pub struct ArticleRender {
    pub article_id: i64,
    pub title: String,
    pub body_html: String,
    pub footer: ArticleFooter,
}

/// Footer metadata rendered under the article.
#[derive(Debug, Clone)]
pub struct ArticleFooter {
    pub article_id: i64,
    pub is_current_user_author: bool,
    pub visits: i64,
    pub time: String,
    pub comments_count: u64,
}

/// Aborts the fetch task when the view is dropped, so a response arriving
/// after teardown has nowhere to go.
struct FetchGuard(JoinHandle<()>);

impl Drop for FetchGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// The article view component.
///
/// `mount` issues exactly one fetch; the state starts at Loading and
/// moves once, to Loaded or Failed.
pub struct ArticleView {
    state: Arc<RwLock<ViewState>>,
    _fetch: FetchGuard,
}

impl ArticleView {
    pub fn mount(client: ArticleClient, article_id: i64, current_user: Option<Uuid>) -> Self {
        let state = Arc::new(RwLock::new(ViewState::Loading));
        let shared = Arc::clone(&state);

        let handle = tokio::spawn(async move {
            let result = client.fetch_post(article_id).await;
            if let Err(err) = &result {
                tracing::warn!(article_id, error = %err, "article fetch failed");
            }
            *shared.write().await = ViewState::on_response(result, current_user);
        });

        Self {
            state,
            _fetch: FetchGuard(handle),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Render contract: nothing until the article is present.
    pub async fn render(&self) -> Option<ArticleRender> {
        let state = self.state.read().await;
        let ViewState::Loaded(loaded) = &*state else {
            return None;
        };

        Some(ArticleRender {
            article_id: loaded.article.id,
            title: loaded.article.title.clone(),
            body_html: loaded.article.content.clone(),
            footer: ArticleFooter {
                article_id: loaded.article.id,
                is_current_user_author: loaded.is_current_user_author,
                visits: loaded.article.pv,
                time: loaded.article.created_at_text.clone(),
                comments_count: loaded.article.comments_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quill_shared::dto::AuthorDto;

    fn detail(author_id: Uuid) -> PostDetailResponse {
        PostDetailResponse {
            post: PostDto {
                id: 11,
                author: AuthorDto {
                    id: author_id,
                    name: "ada".to_string(),
                    gender: "f".to_string(),
                    bio: String::new(),
                    avatar: String::new(),
                },
                title: "Greeting".to_string(),
                content: "<h1>Hi</h1>\n".to_string(),
                created_at: Utc::now(),
                created_at_text: "2024-03-09 17:05".to_string(),
                pv: 42,
                comments_count: 2,
            },
            comments: vec![],
        }
    }

    #[test]
    fn success_moves_to_loaded_with_author_flag() {
        let author = Uuid::new_v4();

        let state = ViewState::on_response(Ok(detail(author)), Some(author));
        let ViewState::Loaded(loaded) = state else {
            panic!("expected Loaded");
        };
        assert!(loaded.is_current_user_author);

        let state = ViewState::on_response(Ok(detail(author)), Some(Uuid::new_v4()));
        let ViewState::Loaded(loaded) = state else {
            panic!("expected Loaded");
        };
        assert!(!loaded.is_current_user_author);

        let state = ViewState::on_response(Ok(detail(author)), None);
        let ViewState::Loaded(loaded) = state else {
            panic!("expected Loaded");
        };
        assert!(!loaded.is_current_user_author);
    }

    #[test]
    fn failure_moves_to_failed() {
        let state = ViewState::on_response(Err(FetchError::NotFound), None);
        assert!(matches!(state, ViewState::Failed(FetchError::NotFound)));
    }

    #[tokio::test]
    async fn render_is_none_until_loaded() {
        let view = ArticleView {
            state: Arc::new(RwLock::new(ViewState::Loading)),
            _fetch: FetchGuard(tokio::spawn(async {})),
        };
        assert!(view.render().await.is_none());

        let author = Uuid::new_v4();
        *view.state.write().await = ViewState::on_response(Ok(detail(author)), Some(author));

        let rendered = view.render().await.unwrap();
        assert_eq!(rendered.article_id, 11);
        assert_eq!(rendered.body_html, "<h1>Hi</h1>\n");
        assert!(rendered.footer.is_current_user_author);
        assert_eq!(rendered.footer.visits, 42);
        assert_eq!(rendered.footer.comments_count, 2);
        assert_eq!(rendered.footer.time, "2024-03-09 17:05");
    }

    #[tokio::test]
    async fn dropping_the_view_aborts_the_fetch() {
        let handle = tokio::spawn(std::future::pending::<()>());
        let abort_handle = handle.abort_handle();

        let guard = FetchGuard(handle);
        drop(guard);

        // Give the runtime a few ticks to process the abort.
        for _ in 0..10 {
            if abort_handle.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(abort_handle.is_finished());
    }
}
