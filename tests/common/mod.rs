//! Shared fixtures for integration tests
//!
//! Seeds two users, one forum and two threads:
//! - thread 1, slug `general`
//! - thread 2, slug `offtopic`

#![allow(dead_code)]

use std::sync::Arc;

use forumd::forum::{Fixtures, MemoryStore, NewPost, Post, PostService, ThreadKey};

pub const FIXTURES: &str = r#"{
    "users": [
        {"nickname": "alice", "fullname": "Alice", "email": "alice@example.com"},
        {"nickname": "Bob", "email": "bob@example.com"}
    ],
    "forums": [{"slug": "rust", "title": "Rust", "user": "alice"}],
    "threads": [
        {"title": "General", "author": "alice", "forum": "rust", "message": "Welcome", "slug": "general"},
        {"title": "Off topic", "author": "bob", "forum": "rust", "message": "Anything", "slug": "offtopic"}
    ]
}"#;

pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    Fixtures::from_json(FIXTURES)
        .unwrap()
        .apply(store.as_ref())
        .unwrap();
    store
}

pub fn seeded_service() -> Arc<PostService> {
    Arc::new(PostService::new(seeded_store()))
}

/// Creates one post and returns it
pub fn post(service: &PostService, thread: u64, candidate: NewPost) -> Post {
    service
        .create_posts(&ThreadKey::Id(thread), vec![candidate])
        .unwrap()
        .remove(0)
}

/// Builds the reference tree in thread 1 and returns the ids in creation order
///
/// ```text
/// r1
/// ├── c1
/// │   └── g1
/// └── c2
/// r2
/// └── c3
/// r3
/// ```
pub fn reference_tree(service: &PostService) -> [u64; 7] {
    let r1 = post(service, 1, NewPost::new("alice", "r1")).id;
    let r2 = post(service, 1, NewPost::new("bob", "r2")).id;
    let c1 = post(service, 1, NewPost::new("bob", "c1").reply_to(r1)).id;
    let c2 = post(service, 1, NewPost::new("alice", "c2").reply_to(r1)).id;
    let g1 = post(service, 1, NewPost::new("alice", "g1").reply_to(c1)).id;
    let c3 = post(service, 1, NewPost::new("alice", "c3").reply_to(r2)).id;
    let r3 = post(service, 1, NewPost::new("bob", "r3")).id;
    [r1, r2, c1, c2, g1, c3, r3]
}

pub fn messages(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.message.as_str()).collect()
}
