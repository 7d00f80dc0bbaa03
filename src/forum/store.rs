//! # Forum Storage
//!
//! Abstraction over row storage for users, forums, threads and posts.
//! The in-memory implementation keeps every table behind one `RwLock`, so a
//! batch insert is visible to readers either completely or not at all.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Range;
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, Utc};

use super::errors::{ForumError, ForumResult};
use super::model::{Forum, NewThread, Post, StoreStatus, Thread, ThreadKey, User};

/// Storage collaborator for the forum engines
pub trait ForumStore: Send + Sync {
    /// Find a user by nickname (case-insensitive)
    fn find_user(&self, nickname: &str) -> ForumResult<Option<User>>;

    /// Find a forum by slug (case-insensitive)
    fn find_forum(&self, slug: &str) -> ForumResult<Option<Forum>>;

    /// Find a thread by id or slug (slug is case-insensitive)
    fn find_thread(&self, key: &ThreadKey) -> ForumResult<Option<Thread>>;

    /// Find a post by id
    fn find_post(&self, id: u64) -> ForumResult<Option<Post>>;

    /// Snapshot of every post in a thread, in insertion order
    fn thread_posts(&self, thread_id: u64) -> ForumResult<Vec<Post>>;

    /// Reserve a contiguous block of post ids together with the batch
    /// creation time. Ids are never handed out twice, and a later block never
    /// carries an earlier timestamp.
    fn reserve_batch(&self, count: u64) -> ForumResult<BatchReservation>;

    /// Insert a batch of fully built posts atomically.
    /// Every reply must extend the stored path of a parent in the same thread.
    fn insert_posts(&self, posts: &[Post]) -> ForumResult<()>;

    /// Replace a post's message and mark it edited
    fn update_post_message(&self, id: u64, message: &str) -> ForumResult<Option<Post>>;

    /// Insert a user
    fn insert_user(&self, user: User) -> ForumResult<User>;

    /// Insert a forum owned by an existing user
    fn insert_forum(&self, forum: Forum) -> ForumResult<Forum>;

    /// Insert a thread, assigning its id
    fn insert_thread(&self, thread: NewThread) -> ForumResult<Thread>;

    /// Row counts
    fn status(&self) -> ForumResult<StoreStatus>;
}

/// Ids and timestamp shared by one creation batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReservation {
    pub ids: Range<u64>,
    pub created: DateTime<Utc>,
}

#[derive(Debug)]
struct PostSequence {
    next_id: u64,
    last_created: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Tables {
    /// Keyed by lower-cased nickname
    users: HashMap<String, User>,
    /// Keyed by lower-cased slug
    forums: HashMap<String, Forum>,
    threads: BTreeMap<u64, Thread>,
    /// Lower-cased slug to thread id
    thread_slugs: HashMap<String, u64>,
    posts: HashMap<u64, Post>,
    /// Post ids per thread, in insertion order
    thread_posts: HashMap<u64, Vec<u64>>,
    next_thread_id: u64,
}

/// In-memory forum store
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    sequence: Mutex<PostSequence>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                next_thread_id: 1,
                ..Tables::default()
            }),
            sequence: Mutex::new(PostSequence {
                next_id: 1,
                last_created: None,
            }),
        }
    }

    fn key(raw: &str) -> String {
        raw.to_lowercase()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ForumStore for MemoryStore {
    fn find_user(&self, nickname: &str) -> ForumResult<Option<User>> {
        let tables = self.tables.read().map_err(|_| ForumError::lock_poisoned())?;
        Ok(tables.users.get(&Self::key(nickname)).cloned())
    }

    fn find_forum(&self, slug: &str) -> ForumResult<Option<Forum>> {
        let tables = self.tables.read().map_err(|_| ForumError::lock_poisoned())?;
        Ok(tables.forums.get(&Self::key(slug)).cloned())
    }

    fn find_thread(&self, key: &ThreadKey) -> ForumResult<Option<Thread>> {
        let tables = self.tables.read().map_err(|_| ForumError::lock_poisoned())?;
        let id = match key {
            ThreadKey::Id(id) => Some(*id),
            ThreadKey::Slug(slug) => tables.thread_slugs.get(&Self::key(slug)).copied(),
        };
        Ok(id.and_then(|id| tables.threads.get(&id)).cloned())
    }

    fn find_post(&self, id: u64) -> ForumResult<Option<Post>> {
        let tables = self.tables.read().map_err(|_| ForumError::lock_poisoned())?;
        Ok(tables.posts.get(&id).cloned())
    }

    fn thread_posts(&self, thread_id: u64) -> ForumResult<Vec<Post>> {
        let tables = self.tables.read().map_err(|_| ForumError::lock_poisoned())?;
        let Some(ids) = tables.thread_posts.get(&thread_id) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| tables.posts.get(id))
            .cloned()
            .collect())
    }

    fn reserve_batch(&self, count: u64) -> ForumResult<BatchReservation> {
        let mut sequence = self.sequence.lock().map_err(|_| ForumError::lock_poisoned())?;

        let start = sequence.next_id;
        let end = start
            .checked_add(count)
            .ok_or_else(|| ForumError::Storage("Post id space exhausted".to_string()))?;

        // Clamp to the previous batch so a clock step back cannot reorder ids
        let now = Utc::now();
        let created = match sequence.last_created {
            Some(last) if last > now => last,
            _ => now,
        };

        sequence.next_id = end;
        sequence.last_created = Some(created);
        Ok(BatchReservation {
            ids: start..end,
            created,
        })
    }

    fn insert_posts(&self, posts: &[Post]) -> ForumResult<()> {
        let mut tables = self.tables.write().map_err(|_| ForumError::lock_poisoned())?;

        // Check the whole batch before touching any table
        let mut seen = HashSet::with_capacity(posts.len());
        for post in posts {
            if tables.posts.contains_key(&post.id) || !seen.insert(post.id) {
                return Err(ForumError::AlreadyExists(format!("post {}", post.id)));
            }
            if !tables.threads.contains_key(&post.thread) {
                return Err(ForumError::ThreadNotFound(post.thread.to_string()));
            }
            let placed = match post.parent {
                None => post.path.is_root() && post.path.root_id() == Some(post.id),
                Some(parent_id) => tables.posts.get(&parent_id).is_some_and(|parent| {
                    parent.thread == post.thread && post.path.extends(&parent.path)
                }),
            };
            if !placed {
                return Err(ForumError::ParentConflict {
                    parent: post.parent.unwrap_or_default(),
                    thread: post.thread,
                });
            }
        }

        for post in posts {
            tables
                .thread_posts
                .entry(post.thread)
                .or_default()
                .push(post.id);
            if let Some(forum) = tables.forums.get_mut(&Self::key(&post.forum)) {
                forum.posts += 1;
            }
            tables.posts.insert(post.id, post.clone());
        }

        Ok(())
    }

    fn update_post_message(&self, id: u64, message: &str) -> ForumResult<Option<Post>> {
        let mut tables = self.tables.write().map_err(|_| ForumError::lock_poisoned())?;
        Ok(tables.posts.get_mut(&id).map(|post| {
            post.message = message.to_string();
            post.is_edited = true;
            post.clone()
        }))
    }

    fn insert_user(&self, user: User) -> ForumResult<User> {
        let mut tables = self.tables.write().map_err(|_| ForumError::lock_poisoned())?;
        let key = Self::key(&user.nickname);
        if tables.users.contains_key(&key) {
            return Err(ForumError::AlreadyExists(format!("user {}", user.nickname)));
        }
        tables.users.insert(key, user.clone());
        Ok(user)
    }

    fn insert_forum(&self, mut forum: Forum) -> ForumResult<Forum> {
        let mut tables = self.tables.write().map_err(|_| ForumError::lock_poisoned())?;
        let owner = tables
            .users
            .get(&Self::key(&forum.user))
            .ok_or_else(|| ForumError::UserNotFound(forum.user.clone()))?;

        let key = Self::key(&forum.slug);
        if tables.forums.contains_key(&key) {
            return Err(ForumError::AlreadyExists(format!("forum {}", forum.slug)));
        }

        forum.user = owner.nickname.clone();
        forum.posts = 0;
        forum.threads = 0;
        tables.forums.insert(key, forum.clone());
        Ok(forum)
    }

    fn insert_thread(&self, thread: NewThread) -> ForumResult<Thread> {
        let mut tables = self.tables.write().map_err(|_| ForumError::lock_poisoned())?;
        let author = tables
            .users
            .get(&Self::key(&thread.author))
            .map(|user| user.nickname.clone())
            .ok_or_else(|| ForumError::UserNotFound(thread.author.clone()))?;

        let forum_key = Self::key(&thread.forum);
        let forum_slug = tables
            .forums
            .get(&forum_key)
            .map(|forum| forum.slug.clone())
            .ok_or_else(|| ForumError::ForumNotFound(thread.forum.clone()))?;

        let slug_key = thread.slug.as_deref().map(Self::key);
        if let Some(slug_key) = &slug_key {
            if tables.thread_slugs.contains_key(slug_key) {
                return Err(ForumError::AlreadyExists(format!("thread {}", slug_key)));
            }
        }

        let id = tables.next_thread_id;
        let stored = Thread {
            id,
            title: thread.title,
            author,
            forum: forum_slug,
            message: thread.message,
            votes: thread.votes,
            slug: thread.slug,
            created: thread.created.unwrap_or_else(Utc::now),
        };

        tables.next_thread_id += 1;
        if let Some(slug_key) = slug_key {
            tables.thread_slugs.insert(slug_key, id);
        }
        if let Some(forum) = tables.forums.get_mut(&forum_key) {
            forum.threads += 1;
        }
        tables.threads.insert(id, stored.clone());
        Ok(stored)
    }

    fn status(&self) -> ForumResult<StoreStatus> {
        let tables = self.tables.read().map_err(|_| ForumError::lock_poisoned())?;
        Ok(StoreStatus {
            user: tables.users.len() as u64,
            forum: tables.forums.len() as u64,
            thread: tables.threads.len() as u64,
            post: tables.posts.len() as u64,
        })
    }
}
