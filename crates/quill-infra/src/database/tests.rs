use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, UserRepository};

use super::entity::{post, user};
use super::repos::{PostgresPostRepository, PostgresUserRepository};

#[tokio::test]
async fn find_post_by_id_maps_to_domain() {
    let author_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: 7,
            author_id,
            title: "Test Post".to_owned(),
            content: "# markdown".to_owned(),
            created_at: now.into(),
            pv: 3,
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(7).await.unwrap();

    let found = result.unwrap();
    assert_eq!(found.id, 7);
    assert_eq!(found.author_id, author_id);
    assert_eq!(found.content, "# markdown");
    assert_eq!(found.pv, 3);
}

#[tokio::test]
async fn inc_pv_on_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let err = repo.inc_pv(42).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn inc_pv_succeeds_when_a_row_is_touched() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    repo.inc_pv(42).await.unwrap();
}

#[tokio::test]
async fn find_by_email_handles_multibyte_local_parts() {
    // The log masking must not slice inside a UTF-8 character.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<user::Model>::new(), Vec::<user::Model>::new()])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let result = repo.find_by_email("ü@example.com").await.unwrap();
    assert!(result.is_none());

    let result = repo.find_by_email("über@example.com").await.unwrap();
    assert!(result.is_none());
}
