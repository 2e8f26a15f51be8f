//! Integration tests for the videos vertical slice
//!
//! Covers identity constraints (title, content hash, external URL),
//! owner-scope isolation, list filters, and cascade-on-delete.


use reel_core::types::*;
use reel_core::ReelError;
use test_helpers::*;

#[tokio::test]
async fn insert_and_get_local_video() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    let video = create_local_video(pool, &user, "Clip A", "hash-a").await;

    let retrieved = reel_storage::videos::get_by_id(pool, &user, &video.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(retrieved.id, video.id);
    assert_eq!(retrieved.title, "Clip A");
    assert_eq!(retrieved.filename(), Some("hash-a.mp4"));
    assert_eq!(retrieved.content_hash(), Some("hash-a"));
    assert_eq!(retrieved.kind(), SourceKind::Local);
}

#[tokio::test]
async fn get_video_is_scoped_to_owner() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let alice = owner("alice");
    let bob = owner("bob");

    let video = create_local_video(pool, &alice, "Private", "hash-p").await;

    // Bob cannot see Alice's video at all
    let seen = reel_storage::videos::get_by_id(pool, &bob, &video.id)
        .await
        .unwrap();
    assert!(seen.is_none());
}

#[tokio::test]
async fn duplicate_title_in_scope_is_conflict() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    create_local_video(pool, &user, "Same Title", "hash-1").await;

    let duplicate = Video::new_local(
        user.clone(),
        "Same Title",
        "other.mp4",
        "hash-2",
        "video/mp4",
        2048,
    );
    let err = reel_storage::videos::insert(pool, &duplicate)
        .await
        .unwrap_err();

    assert!(matches!(err, ReelError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn same_title_under_different_owners_is_allowed() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_local_video(pool, &owner("alice"), "Shared Title", "hash-a").await;
    create_local_video(pool, &owner("bob"), "Shared Title", "hash-b").await;
}

#[tokio::test]
async fn duplicate_content_hash_is_conflict() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    create_local_video(pool, &user, "First", "hash-same").await;

    let duplicate = Video::new_local(
        user.clone(),
        "Second",
        "second.mp4",
        "hash-same",
        "video/mp4",
        1024,
    );
    let err = reel_storage::videos::insert(pool, &duplicate)
        .await
        .unwrap_err();

    assert!(matches!(err, ReelError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn find_by_content_hash_hits_within_scope() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    let video = create_local_video(pool, &user, "Clip", "hash-x").await;

    let found = reel_storage::videos::find_by_content_hash(pool, &user, "hash-x")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, video.id);

    let missed = reel_storage::videos::find_by_content_hash(pool, &user, "hash-y")
        .await
        .unwrap();
    assert!(missed.is_none());

    // Another scope does not observe the hit
    let foreign = reel_storage::videos::find_by_content_hash(pool, &owner("bob"), "hash-x")
        .await
        .unwrap();
    assert!(foreign.is_none());
}

#[tokio::test]
async fn find_by_external_url() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    let video = create_external_video(pool, &user, "Linked", "https://example.com/v/1").await;

    let found = reel_storage::videos::find_by_external_url(pool, &user, "https://example.com/v/1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, video.id);
    assert_eq!(found.external_url(), Some("https://example.com/v/1"));
    assert_eq!(found.filename(), None);
}

#[tokio::test]
async fn duplicate_external_url_is_conflict() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    create_external_video(pool, &user, "Linked", "https://example.com/v/1").await;

    let duplicate = Video::new_external(user.clone(), "Other", "https://example.com/v/1", None);
    let err = reel_storage::videos::insert(pool, &duplicate)
        .await
        .unwrap_err();

    assert!(matches!(err, ReelError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn title_exists_precheck() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    create_local_video(pool, &user, "Known", "hash-k").await;

    assert!(reel_storage::videos::title_exists(pool, &user, "Known")
        .await
        .unwrap());
    assert!(!reel_storage::videos::title_exists(pool, &user, "Unknown")
        .await
        .unwrap());
    // Exact match only
    assert!(!reel_storage::videos::title_exists(pool, &user, "Know")
        .await
        .unwrap());
    // Scoped
    assert!(
        !reel_storage::videos::title_exists(pool, &owner("bob"), "Known")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn list_filters_by_kind_and_title() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    create_local_video(pool, &user, "Holiday footage", "hash-1").await;
    create_local_video(pool, &user, "Conference talk", "hash-2").await;
    create_external_video(pool, &user, "Holiday playlist", "https://example.com/v/1").await;

    let all = reel_storage::videos::list(pool, &user, &VideoFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let local = reel_storage::videos::list(pool, &user, &VideoFilter::kind(SourceKind::Local))
        .await
        .unwrap();
    assert_eq!(local.len(), 2);
    assert!(local.iter().all(Video::is_local));

    let holiday = reel_storage::videos::list(pool, &user, &VideoFilter::title_contains("Holiday"))
        .await
        .unwrap();
    assert_eq!(holiday.len(), 2);

    let both = reel_storage::videos::list(
        pool,
        &user,
        &VideoFilter {
            kind: Some(SourceKind::External),
            title_contains: Some("Holiday".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].title, "Holiday playlist");
}

#[tokio::test]
async fn list_returns_newest_first() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    create_local_video(pool, &user, "Oldest", "hash-1").await;
    create_local_video(pool, &user, "Middle", "hash-2").await;
    create_local_video(pool, &user, "Newest", "hash-3").await;

    let listed = reel_storage::videos::list(pool, &user, &VideoFilter::default())
        .await
        .unwrap();

    let titles: Vec<&str> = listed.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn delete_removes_row_and_memberships() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    let video = create_local_video(pool, &user, "Doomed", "hash-d").await;
    let playlist = create_playlist(pool, &user, "Favorites").await;

    reel_storage::playlists::add_item(pool, &user, &playlist.id, &video.id)
        .await
        .unwrap();

    let deleted = reel_storage::videos::delete(pool, &user, &video.id)
        .await
        .unwrap();
    assert_eq!(deleted.id, video.id);
    assert_eq!(deleted.filename(), Some("hash-d.mp4"));

    assert!(reel_storage::videos::get_by_id(pool, &user, &video.id)
        .await
        .unwrap()
        .is_none());

    let items = reel_storage::playlists::list_items(pool, &user, &playlist.id)
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn delete_missing_or_foreign_video_is_not_found() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = owner("user-1");

    let err = reel_storage::videos::delete(pool, &user, &VideoId::new("no-such"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReelError::NotFound { .. }), "got {err:?}");

    // Foreign-owned video deletes read the same as missing
    let video = create_local_video(pool, &owner("alice"), "Hers", "hash-h").await;
    let err = reel_storage::videos::delete(pool, &user, &video.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ReelError::NotFound { .. }), "got {err:?}");
}
