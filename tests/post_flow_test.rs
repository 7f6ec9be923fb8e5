mod common;

use serial_test::serial;

use blog_service::db::{comment_repo, post_repo};
use blog_service::error::AppError;
use blog_service::models::{CommentDraft, PostDraft};
use blog_service::pagination::Paginator;
use blog_service::services::{CommentService, DeleteOutcome, EditOutcome, PostService};

fn draft(text: &str) -> PostDraft {
    PostDraft {
        text: text.into(),
        group_id: None,
        image_key: None,
    }
}

#[actix_web::test]
#[serial]
async fn author_can_edit_their_own_post() {
    let Some(pool) = common::try_pool().await else {
        return;
    };
    common::cleanup(&pool).await;

    let author = common::create_user(&pool, "author").await;
    let service = PostService::new(pool.clone(), Paginator::default());

    let post = service.create_post(author.id, &draft("first take")).await.unwrap();
    let bystander = service.create_post(author.id, &draft("unrelated")).await.unwrap();
    let outcome = service
        .edit_post(author.id, post.id, &draft("second take"))
        .await
        .unwrap();

    let EditOutcome::Updated(updated) = outcome else {
        panic!("author edit must update the post");
    };
    assert_eq!(updated.id, post.id);
    assert_eq!(updated.text, "second take");
    assert_eq!(updated.author_id, author.id);

    // Exactly one post changed.
    let other = post_repo::find_by_id(&pool, bystander.id).await.unwrap().unwrap();
    assert_eq!(other.text, "unrelated");
}

#[actix_web::test]
#[serial]
async fn non_author_edit_changes_nothing() {
    let Some(pool) = common::try_pool().await else {
        return;
    };
    common::cleanup(&pool).await;

    let author = common::create_user(&pool, "author").await;
    let intruder = common::create_user(&pool, "intruder").await;
    let service = PostService::new(pool.clone(), Paginator::default());

    let post = service.create_post(author.id, &draft("original")).await.unwrap();
    let outcome = service
        .edit_post(intruder.id, post.id, &draft("hijacked"))
        .await
        .unwrap();

    assert!(matches!(outcome, EditOutcome::NotAuthor { post_id } if post_id == post.id));
    let stored = post_repo::find_by_id(&pool, post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "original");
}

#[actix_web::test]
#[serial]
async fn blank_text_persists_nothing() {
    let Some(pool) = common::try_pool().await else {
        return;
    };
    common::cleanup(&pool).await;

    let author = common::create_user(&pool, "author").await;
    let service = PostService::new(pool.clone(), Paginator::default());

    let err = service.create_post(author.id, &draft("   ")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(post_repo::count_all(&pool).await.unwrap(), 0);

    // A failed edit leaves the stored text untouched too.
    let post = service.create_post(author.id, &draft("kept")).await.unwrap();
    let err = service.edit_post(author.id, post.id, &draft("")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    let stored = post_repo::find_by_id(&pool, post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "kept");
}

#[actix_web::test]
#[serial]
async fn group_page_splits_thirteen_posts_and_clamps_past_the_end() {
    let Some(pool) = common::try_pool().await else {
        return;
    };
    common::cleanup(&pool).await;

    let author = common::create_user(&pool, "author").await;
    let group = common::create_group(&pool, "Test group", "test-group").await;
    let service = PostService::new(pool.clone(), Paginator::default());

    let mut ids = Vec::new();
    for i in 0..13 {
        let id = common::create_post_aged(
            &pool,
            &author,
            &format!("post {}", i),
            Some(group.id),
            60 - i, // oldest first, so post 12 is the newest
        )
        .await;
        ids.push(id);
    }
    ids.reverse(); // newest-first, the order pages come back in

    let (_, first) = service.group_page("test-group", 1).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_next);
    let first_ids: Vec<i64> = first.items.iter().map(|p| p.id).collect();
    assert_eq!(first_ids, ids[..10].to_vec());

    let (_, second) = service.group_page("test-group", 2).await.unwrap();
    assert_eq!(second.items.len(), 3);
    assert!(!second.has_next);
    let second_ids: Vec<i64> = second.items.iter().map(|p| p.id).collect();
    assert_eq!(second_ids, ids[10..].to_vec());

    // Requests past the end land on the last page instead of failing.
    let (_, clamped) = service.group_page("test-group", 3).await.unwrap();
    assert_eq!(clamped.number, 2);
    let clamped_ids: Vec<i64> = clamped.items.iter().map(|p| p.id).collect();
    assert_eq!(clamped_ids, second_ids);
}

#[actix_web::test]
#[serial]
async fn group_posts_stay_out_of_other_groups() {
    let Some(pool) = common::try_pool().await else {
        return;
    };
    common::cleanup(&pool).await;

    let author = common::create_user(&pool, "author").await;
    let cats = common::create_group(&pool, "Cats", "cats").await;
    let dogs = common::create_group(&pool, "Dogs", "dogs").await;
    let service = PostService::new(pool.clone(), Paginator::default());

    common::create_post_aged(&pool, &author, "about cats", Some(cats.id), 10).await;
    common::create_post_aged(&pool, &author, "about dogs", Some(dogs.id), 5).await;
    common::create_post_aged(&pool, &author, "no group", None, 1).await;

    let (_, cat_page) = service.group_page("cats", 1).await.unwrap();
    assert_eq!(cat_page.total_items, 1);
    assert_eq!(cat_page.items[0].text, "about cats");

    let home = service.home_page(1).await.unwrap();
    assert_eq!(home.total_items, 3);
}

#[actix_web::test]
#[serial]
async fn comment_author_is_the_acting_user() {
    let Some(pool) = common::try_pool().await else {
        return;
    };
    common::cleanup(&pool).await;

    let author = common::create_user(&pool, "author").await;
    let commenter = common::create_user(&pool, "commenter").await;
    let post = common::create_post(&pool, &author, "a post").await;
    let service = CommentService::new(pool.clone());

    let comment = service
        .add_comment(commenter.id, post.id, &CommentDraft { text: "nice".into() })
        .await
        .unwrap();

    assert_eq!(comment.author_id, commenter.id);
    assert_eq!(comment.author_username, "commenter");
    assert_eq!(comment.post_id, post.id);

    let err = service
        .add_comment(commenter.id, post.id, &CommentDraft { text: " ".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(comment_repo::count_by_post(&pool, post.id).await.unwrap(), 1);
}

#[actix_web::test]
#[serial]
async fn commenting_on_a_missing_post_is_not_found() {
    let Some(pool) = common::try_pool().await else {
        return;
    };
    common::cleanup(&pool).await;

    let commenter = common::create_user(&pool, "commenter").await;
    let service = CommentService::new(pool.clone());

    let err = service
        .add_comment(commenter.id, 424242, &CommentDraft { text: "hello".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_web::test]
#[serial]
async fn deleting_a_post_cascades_its_comments() {
    let Some(pool) = common::try_pool().await else {
        return;
    };
    common::cleanup(&pool).await;

    let author = common::create_user(&pool, "author").await;
    let commenter = common::create_user(&pool, "commenter").await;
    let post_service = PostService::new(pool.clone(), Paginator::default());
    let comment_service = CommentService::new(pool.clone());

    let post = post_service.create_post(author.id, &draft("ephemeral")).await.unwrap();
    comment_service
        .add_comment(commenter.id, post.id, &CommentDraft { text: "gone soon".into() })
        .await
        .unwrap();

    // A non-author delete is refused first.
    let refused = post_service.delete_post(commenter.id, post.id).await.unwrap();
    assert!(matches!(refused, DeleteOutcome::NotAuthor { .. }));

    let outcome = post_service.delete_post(author.id, post.id).await.unwrap();
    assert!(
        matches!(outcome, DeleteOutcome::Deleted { ref author_username } if author_username == "author")
    );
    assert!(post_repo::find_by_id(&pool, post.id).await.unwrap().is_none());
    assert_eq!(comment_repo::count_by_post(&pool, post.id).await.unwrap(), 0);
}
