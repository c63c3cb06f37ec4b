use chrono::{Duration, Utc};
use mockall::{mock, predicate::eq, Sequence};

use portfolio_admin::entities::comment::Comment;
use portfolio_admin::errors::AppError;
use portfolio_admin::listing::{CommentFilter, ListControls};
use portfolio_admin::use_cases::comments::CommentsHandler;

mock! {
    pub CommentRepo {}

    #[async_trait::async_trait]
    impl portfolio_admin::repositories::comments::CommentRepository for CommentRepo {
        async fn fetch_comments(&self) -> Result<Vec<Comment>, AppError>;
        async fn set_pinned(&self, id: i64, pinned: bool) -> Result<(), AppError>;
        async fn delete_comment(&self, id: i64) -> Result<(), AppError>;
    }
}

fn comment(id: i64, name: &str, pinned: bool) -> Comment {
    Comment {
        id,
        user_name: Some(name.to_string()),
        content: format!("comment {id}"),
        profile_image: None,
        is_pinned: pinned,
        created_at: Utc::now() - Duration::minutes(id),
    }
}

/// Pinned first, newest first within each group — the order the backend
/// returns.
fn collection() -> Vec<Comment> {
    vec![
        comment(2, "alice", true),
        comment(5, "bob", true),
        comment(1, "carol", false),
        comment(3, "dave", false),
        comment(4, "erin", false),
    ]
}

#[actix_rt::test]
async fn failed_fetch_renders_an_empty_collection() {
    let mut repo = MockCommentRepo::new();
    repo.expect_fetch_comments()
        .times(1)
        .returning(|| Err(AppError::RemoteApi("backend down".to_string())));

    let handler = CommentsHandler::new(repo);
    let view = handler.browse(&ListControls::new()).await;

    assert_eq!(view.total, 0);
    assert_eq!(view.total_pages, 1);
    assert!(view.comments.is_empty());
}

#[actix_rt::test]
async fn pin_updates_the_record_then_refetches() {
    let mut repo = MockCommentRepo::new();
    let mut seq = Sequence::new();

    repo.expect_set_pinned()
        .with(eq(3), eq(true))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    repo.expect_fetch_comments()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| {
            let mut comments = collection();
            if let Some(pinned) = comments.iter_mut().find(|c| c.id == 3) {
                pinned.is_pinned = true;
            }
            Ok(comments)
        });

    let handler = CommentsHandler::new(repo);
    let view = handler
        .set_pinned(3, true, &ListControls::new())
        .await
        .expect("pin should succeed");

    assert_eq!(view.pinned_count, 3);
}

#[actix_rt::test]
async fn pinning_an_already_pinned_comment_changes_nothing() {
    let mut repo = MockCommentRepo::new();
    repo.expect_fetch_comments()
        .times(2)
        .returning(|| Ok(collection()));
    repo.expect_set_pinned()
        .with(eq(2), eq(true))
        .times(1)
        .returning(|_, _| Ok(()));

    let controls = ListControls::new();
    let handler = CommentsHandler::new(repo);

    let before = serde_json::to_value(handler.browse(&controls).await).unwrap();
    let after = serde_json::to_value(handler.set_pinned(2, true, &controls).await.unwrap()).unwrap();

    assert_eq!(before, after);
}

#[actix_rt::test]
async fn declined_delete_performs_no_remote_call() {
    // No expectations: any repository call would panic the test.
    let repo = MockCommentRepo::new();

    let handler = CommentsHandler::new(repo);
    let outcome = handler
        .remove(4, false, &ListControls::new())
        .await
        .expect("declining is not an error");

    assert!(outcome.is_none());
}

#[actix_rt::test]
async fn confirmed_delete_deletes_then_refetches() {
    let mut repo = MockCommentRepo::new();
    let mut seq = Sequence::new();

    repo.expect_delete_comment()
        .with(eq(4))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    repo.expect_fetch_comments()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| {
            Ok(collection()
                .into_iter()
                .filter(|c| c.id != 4)
                .collect())
        });

    let handler = CommentsHandler::new(repo);
    let view = handler
        .remove(4, true, &ListControls::new())
        .await
        .expect("delete should succeed")
        .expect("confirmed delete yields the refreshed view");

    assert_eq!(view.total, 4);
    assert!(view.comments.iter().all(|c| c.id != 4));
}

#[actix_rt::test]
async fn mutation_preserves_the_callers_controls() {
    let mut repo = MockCommentRepo::new();
    repo.expect_set_pinned().returning(|_, _| Ok(()));
    repo.expect_fetch_comments().returning(|| Ok(collection()));

    let controls = ListControls {
        filter: CommentFilter::Pinned,
        search: String::new(),
        page: 1,
    };

    let handler = CommentsHandler::new(repo);
    let view = handler.set_pinned(2, true, &controls).await.unwrap();

    assert_eq!(view.filtered_total, 2);
    assert!(view.comments.iter().all(|c| c.is_pinned));
}
