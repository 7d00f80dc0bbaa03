//! Bulk Post Creation Tests
//!
//! - A batch commits entirely or not at all
//! - Batch members share one timestamp and get ascending ids
//! - Concurrent batches never collide on ids

mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use common::{post, seeded_service};
use forumd::forum::{
    ErrorKind, ForumError, ForumStore, NewPost, PageRequest, PostService, SortMode, ThreadKey,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn forum_posts(service: &PostService) -> u64 {
    service.store().find_forum("rust").unwrap().unwrap().posts
}

fn thread_len(service: &PostService, thread: u64) -> usize {
    service
        .select_thread_posts(
            &ThreadKey::Id(thread),
            &PageRequest::new(SortMode::Flat).limit(1_000),
        )
        .unwrap()
        .len()
}

// =============================================================================
// Successful Batches
// =============================================================================

/// `parent: 0` means top-level, same as omitting it.
#[test]
fn test_batch_with_zero_parent() {
    let service = seeded_service();
    let batch: Vec<NewPost> = serde_json::from_str(
        r#"[
            {"author": "alice", "message": "first", "parent": 0},
            {"author": "bob", "message": "second"}
        ]"#,
    )
    .unwrap();

    let posts = service.create_posts(&ThreadKey::Id(1), batch).unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.parent.is_none()));
    assert_eq!(posts[0].created, posts[1].created);
    assert_eq!(posts[1].id, posts[0].id + 1);
    assert_eq!(posts[1].author, "Bob");
    assert!(posts.iter().all(|p| p.forum == "rust" && p.thread == 1));
    assert!(posts.iter().all(|p| !p.is_edited));
}

#[test]
fn test_batch_order_is_preserved() {
    let service = seeded_service();
    let root = post(&service, 1, NewPost::new("alice", "root"));

    let batch = vec![
        NewPost::new("bob", "a").reply_to(root.id),
        NewPost::new("alice", "b"),
        NewPost::new("bob", "c").reply_to(root.id),
    ];
    let posts = service
        .create_posts(&ThreadKey::Slug("general".into()), batch)
        .unwrap();

    let messages: Vec<_> = posts.iter().map(|p| p.message.as_str()).collect();
    assert_eq!(messages, ["a", "b", "c"]);
    assert_eq!(posts[0].parent, Some(root.id));
    assert_eq!(posts[1].parent, None);
    assert!(posts.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_empty_batch_is_noop() {
    let service = seeded_service();
    let posts = service.create_posts(&ThreadKey::Id(1), Vec::new()).unwrap();

    assert!(posts.is_empty());
    assert_eq!(service.status().unwrap().post, 0);
    assert_eq!(forum_posts(&service), 0);
}

#[test]
fn test_forum_counter_tracks_posts() {
    let service = seeded_service();
    post(&service, 1, NewPost::new("alice", "one"));
    service
        .create_posts(
            &ThreadKey::Id(2),
            vec![NewPost::new("bob", "two"), NewPost::new("bob", "three")],
        )
        .unwrap();

    assert_eq!(forum_posts(&service), 3);
    assert_eq!(service.status().unwrap().post, 3);
}

// =============================================================================
// Rejected Batches
// =============================================================================

#[test]
fn test_unknown_thread() {
    let service = seeded_service();
    let err = service
        .create_posts(&ThreadKey::Id(99), vec![NewPost::new("alice", "x")])
        .unwrap_err();
    assert_eq!(err, ForumError::ThreadNotFound("99".to_string()));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// The thread check runs before the empty-batch shortcut.
#[test]
fn test_empty_batch_on_unknown_thread() {
    let service = seeded_service();
    let err = service
        .create_posts(&ThreadKey::Slug("nope".into()), Vec::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_unknown_author_rejects_whole_batch() {
    let service = seeded_service();
    let batch = vec![NewPost::new("alice", "ok"), NewPost::new("mallory", "nope")];

    let err = service.create_posts(&ThreadKey::Id(1), batch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(thread_len(&service, 1), 0);
    assert_eq!(forum_posts(&service), 0);
}

#[test]
fn test_cross_thread_parent_conflicts() {
    let service = seeded_service();
    let other = post(&service, 2, NewPost::new("bob", "elsewhere"));

    let batch = vec![
        NewPost::new("alice", "fine"),
        NewPost::new("alice", "bad").reply_to(other.id),
    ];
    let err = service.create_posts(&ThreadKey::Id(1), batch).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(thread_len(&service, 1), 0);
    assert_eq!(forum_posts(&service), 1);
}

#[test]
fn test_missing_parent_conflicts() {
    let service = seeded_service();
    let err = service
        .create_posts(
            &ThreadKey::Id(1),
            vec![NewPost::new("alice", "orphan").reply_to(404)],
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

/// Parents must already be stored; a batch cannot reply to its own members.
#[test]
fn test_parent_in_same_batch_conflicts() {
    let service = seeded_service();
    let next = post(&service, 1, NewPost::new("alice", "seed")).id + 1;

    let batch = vec![
        NewPost::new("alice", "first"),
        NewPost::new("bob", "reply").reply_to(next),
    ];
    let err = service.create_posts(&ThreadKey::Id(1), batch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(thread_len(&service, 1), 1);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_batches_get_unique_ids() {
    let service = seeded_service();
    let root_id = post(&service, 1, NewPost::new("alice", "root")).id;

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let service = Arc::clone(&service);
            let parent = root_id;
            thread::spawn(move || {
                let batch = (0..25)
                    .map(|n| NewPost::new("bob", format!("w{}-{}", worker, n)).reply_to(parent))
                    .collect();
                service.create_posts(&ThreadKey::Id(1), batch).unwrap()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let batch = handle.join().unwrap();
        assert!(batch.windows(2).all(|w| w[0].id < w[1].id));
        assert!(batch.windows(2).all(|w| w[0].created == w[1].created));
        for post in batch {
            assert!(ids.insert(post.id), "duplicate id {}", post.id);
        }
    }

    assert_eq!(ids.len(), 200);
    assert_eq!(thread_len(&service, 1), 201);
    assert_eq!(forum_posts(&service), 201);
}
