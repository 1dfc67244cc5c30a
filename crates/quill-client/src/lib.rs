//! # Quill Client
//!
//! The article view component: fetches one post with its comments and
//! drives a Loading -> Loaded / Failed state machine. In-flight fetches
//! are aborted when the view is torn down.

mod article;
mod fetch;

pub use article::{ArticleFooter, ArticleRender, ArticleView, LoadedArticle, ViewState};
pub use fetch::{ArticleClient, FetchError};
