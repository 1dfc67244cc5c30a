use std::sync::Arc;

use uuid::Uuid;

use quill_core::domain::{PostPatch, User};
use quill_core::error::DomainError;
use quill_core::ports::UserRepository;
use quill_core::service::PostService;

use crate::markdown::PulldownRenderer;
use crate::repository::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository,
};

struct Fixture {
    service: PostService,
    users: Arc<InMemoryUserRepository>,
}

async fn fixture() -> Fixture {
    let posts = Arc::new(InMemoryPostRepository::new());
    let comments = Arc::new(InMemoryCommentRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let service = PostService::new(
        posts,
        comments,
        users.clone(),
        Arc::new(PulldownRenderer::new()),
    );
    Fixture { service, users }
}

async fn author(users: &InMemoryUserRepository, name: &str) -> Uuid {
    let user = User::new(
        format!("{name}@example.com"),
        "$argon2id$not-a-real-hash".to_string(),
        name.to_string(),
    );
    let id = user.id;
    users.save(user).await.unwrap();
    id
}

#[tokio::test]
async fn detail_read_renders_markdown_and_redacts_author() {
    let fx = fixture().await;
    let ada = author(&fx.users, "ada").await;

    let post = fx
        .service
        .create(ada, "Greeting".to_string(), "# Hi".to_string())
        .await
        .unwrap();

    let detail = fx.service.get_post_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(detail.content, "<h1>Hi</h1>\n");
    assert_eq!(detail.comments_count, 0);
    assert_eq!(detail.author.id, ada);
    assert_eq!(detail.author.name, "ada");

    // The stored row keeps markdown: the HTML form is read-time only.
    let raw = fx.service.get_raw_post_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(raw.post.content, "# Hi");
    assert_eq!(raw.author.email, "ada@example.com");
}

#[tokio::test]
async fn refetch_without_mutation_yields_identical_html() {
    let fx = fixture().await;
    let ada = author(&fx.users, "ada").await;
    let post = fx
        .service
        .create(ada, "t".to_string(), "a *b* [c](https://e.org)".to_string())
        .await
        .unwrap();

    let first = fx.service.get_post_by_id(post.id).await.unwrap().unwrap();
    let second = fx.service.get_post_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(first.content, second.content);
}

#[tokio::test]
async fn missing_post_reads_as_none() {
    let fx = fixture().await;
    assert!(fx.service.get_post_by_id(999).await.unwrap().is_none());
    assert!(fx.service.get_raw_post_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn create_rejects_empty_fields() {
    let fx = fixture().await;
    let ada = author(&fx.users, "ada").await;

    let err = fx
        .service
        .create(ada, "  ".to_string(), "body".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = fx
        .service
        .create(ada, "title".to_string(), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn list_is_sorted_newest_first_and_filters_by_author() {
    let fx = fixture().await;
    let ada = author(&fx.users, "ada").await;
    let bob = author(&fx.users, "bob").await;

    let first = fx
        .service
        .create(ada, "one".to_string(), "1".to_string())
        .await
        .unwrap();
    let second = fx
        .service
        .create(bob, "two".to_string(), "2".to_string())
        .await
        .unwrap();
    let third = fx
        .service
        .create(ada, "three".to_string(), "3".to_string())
        .await
        .unwrap();

    let all = fx.service.get_posts(None).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);

    let adas = fx.service.get_posts(Some(ada)).await.unwrap();
    assert_eq!(adas.len(), 2);
    assert!(adas.iter().all(|p| p.author_id == ada));
}

#[tokio::test]
async fn pv_counts_every_increment() {
    let fx = fixture().await;
    let ada = author(&fx.users, "ada").await;
    let post = fx
        .service
        .create(ada, "t".to_string(), "c".to_string())
        .await
        .unwrap();

    for _ in 0..5 {
        fx.service.inc_pv(post.id).await.unwrap();
    }

    let detail = fx.service.get_post_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(detail.pv, 5);
}

#[tokio::test]
async fn comment_counts_show_up_in_list_reads() {
    let fx = fixture().await;
    let ada = author(&fx.users, "ada").await;
    let bob = author(&fx.users, "bob").await;
    let post = fx
        .service
        .create(ada, "t".to_string(), "c".to_string())
        .await
        .unwrap();

    fx.service
        .add_comment(post.id, bob, "nice one".to_string())
        .await
        .unwrap();

    let all = fx.service.get_posts(None).await.unwrap();
    let item = all.iter().find(|p| p.id == post.id).unwrap();
    assert_eq!(item.comments_count, 1);

    let comments = fx.service.comments_for_post(post.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "nice one");
}

#[tokio::test]
async fn commenting_on_a_missing_post_is_not_found() {
    let fx = fixture().await;
    let bob = author(&fx.users, "bob").await;
    let err = fx
        .service
        .add_comment(12345, bob, "into the void".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn update_enforces_ownership() {
    let fx = fixture().await;
    let ada = author(&fx.users, "ada").await;
    let bob = author(&fx.users, "bob").await;
    let post = fx
        .service
        .create(ada, "mine".to_string(), "original".to_string())
        .await
        .unwrap();

    let err = fx
        .service
        .update_post_by_id(
            post.id,
            bob,
            PostPatch {
                title: Some("stolen".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    let err = fx
        .service
        .update_post_by_id(999, ada, PostPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let updated = fx
        .service
        .update_post_by_id(
            post.id,
            ada,
            PostPatch {
                content: Some("revised".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "mine");
    assert_eq!(updated.content, "revised");
}

#[tokio::test]
async fn owner_delete_cascades_comments() {
    let fx = fixture().await;
    let ada = author(&fx.users, "ada").await;
    let bob = author(&fx.users, "bob").await;
    let post = fx
        .service
        .create(ada, "t".to_string(), "c".to_string())
        .await
        .unwrap();
    fx.service
        .add_comment(post.id, bob, "first".to_string())
        .await
        .unwrap();
    fx.service
        .add_comment(post.id, bob, "second".to_string())
        .await
        .unwrap();

    fx.service.del_post_by_id(post.id, ada).await.unwrap();

    assert!(fx.service.get_post_by_id(post.id).await.unwrap().is_none());
    assert!(fx.service.comments_for_post(post.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn foreign_delete_is_forbidden_and_leaves_comments_intact() {
    let fx = fixture().await;
    let ada = author(&fx.users, "ada").await;
    let bob = author(&fx.users, "bob").await;
    let post = fx
        .service
        .create(ada, "t".to_string(), "c".to_string())
        .await
        .unwrap();
    fx.service
        .add_comment(post.id, bob, "keep me".to_string())
        .await
        .unwrap();

    let err = fx.service.del_post_by_id(post.id, bob).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    assert!(fx.service.get_post_by_id(post.id).await.unwrap().is_some());
    assert_eq!(fx.service.comments_for_post(post.id).await.unwrap().len(), 1);
}
