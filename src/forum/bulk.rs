//! Bulk creation engine
//!
//! Validates a batch of post candidates against a thread, then builds and
//! commits the whole batch as one unit:
//!
//! 1. thread must exist (`ThreadNotFound`)
//! 2. an empty batch is a no-op
//! 3. every author must exist (`UserNotFound`)
//! 4. every non-zero parent must be a post of the same thread (`ParentConflict`)
//!
//! All posts of a batch share one creation timestamp. Ids and timestamp are
//! reserved together as one block and assigned in input order, so a batch
//! with higher ids never carries an earlier timestamp.

use std::collections::HashMap;

use super::errors::{ForumError, ForumResult};
use super::model::{NewPost, Post, Thread, ThreadKey};
use super::path::{build_path, PostPath};
use super::store::{BatchReservation, ForumStore};

/// Creates post batches against a store
pub struct BulkCreator<'a> {
    store: &'a dyn ForumStore,
}

impl<'a> BulkCreator<'a> {
    pub fn new(store: &'a dyn ForumStore) -> Self {
        Self { store }
    }

    /// Validates and commits a batch, returning the stored posts in input order.
    pub fn create(&self, key: &ThreadKey, batch: Vec<NewPost>) -> ForumResult<Vec<Post>> {
        let thread = self
            .store
            .find_thread(key)?
            .ok_or_else(|| ForumError::ThreadNotFound(key.to_string()))?;

        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let authors = self.resolve_authors(&batch)?;
        let parents = self.resolve_parents(&thread, &batch)?;

        let posts = self.build(&thread, batch, &authors, &parents)?;
        self.store.insert_posts(&posts)?;
        Ok(posts)
    }

    /// Maps each lower-cased author to its canonical nickname.
    fn resolve_authors(&self, batch: &[NewPost]) -> ForumResult<HashMap<String, String>> {
        let mut authors = HashMap::new();
        for candidate in batch {
            let key = candidate.author.to_lowercase();
            if authors.contains_key(&key) {
                continue;
            }
            let user = self
                .store
                .find_user(&candidate.author)?
                .ok_or_else(|| ForumError::UserNotFound(candidate.author.clone()))?;
            authors.insert(key, user.nickname);
        }
        Ok(authors)
    }

    /// Maps each referenced parent id to its stored ordering path.
    fn resolve_parents(
        &self,
        thread: &Thread,
        batch: &[NewPost],
    ) -> ForumResult<HashMap<u64, PostPath>> {
        let mut parents = HashMap::new();
        for parent_id in batch.iter().filter_map(NewPost::parent_id) {
            if parents.contains_key(&parent_id) {
                continue;
            }
            match self.store.find_post(parent_id)? {
                Some(parent) if parent.thread == thread.id => {
                    parents.insert(parent_id, parent.path);
                }
                _ => {
                    return Err(ForumError::ParentConflict {
                        parent: parent_id,
                        thread: thread.id,
                    })
                }
            }
        }
        Ok(parents)
    }

    fn build(
        &self,
        thread: &Thread,
        batch: Vec<NewPost>,
        authors: &HashMap<String, String>,
        parents: &HashMap<u64, PostPath>,
    ) -> ForumResult<Vec<Post>> {
        let BatchReservation { ids, created } = self.store.reserve_batch(batch.len() as u64)?;

        batch
            .into_iter()
            .zip(ids)
            .map(|(candidate, id)| {
                let parent = candidate.parent_id();
                let author = authors
                    .get(&candidate.author.to_lowercase())
                    .cloned()
                    .ok_or_else(|| ForumError::UserNotFound(candidate.author.clone()))?;
                Ok(Post {
                    id,
                    parent,
                    author,
                    message: candidate.message,
                    is_edited: false,
                    forum: thread.forum.clone(),
                    thread: thread.id,
                    created,
                    path: build_path(parent.and_then(|p| parents.get(&p)), id),
                })
            })
            .collect()
    }
}
