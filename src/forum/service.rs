//! Post service
//!
//! Entry point for the four post operations. Each call resolves its thread
//! or post through the store, delegates to the ordering or bulk creation
//! engine, and records counters. Failures are returned untouched; logging
//! them is the response mapper's job.

use std::fmt;
use std::sync::Arc;

use super::bulk::BulkCreator;
use super::errors::{ForumError, ForumResult};
use super::model::{NewPost, Post, PostDetails, Related, StoreStatus, ThreadKey};
use super::ordering::{order_posts, PageRequest};
use super::store::ForumStore;
use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry};

/// Upper bound applied to requested page sizes
pub const DEFAULT_MAX_PAGE_SIZE: usize = 10_000;

/// Post operations over a forum store
pub struct PostService {
    store: Arc<dyn ForumStore>,
    metrics: Arc<MetricsRegistry>,
    max_page_size: usize,
}

impl fmt::Debug for PostService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostService")
            .field("metrics", &self.metrics.snapshot())
            .field("max_page_size", &self.max_page_size)
            .finish_non_exhaustive()
    }
}

impl PostService {
    pub fn new(store: Arc<dyn ForumStore>) -> Self {
        Self {
            store,
            metrics: Arc::new(MetricsRegistry::new()),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Cap page sizes at `max_page_size`
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    pub fn store(&self) -> &Arc<dyn ForumStore> {
        &self.store
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Creates a batch of posts in a thread.
    pub fn create_posts(&self, key: &ThreadKey, batch: Vec<NewPost>) -> ForumResult<Vec<Post>> {
        let posts = match BulkCreator::new(self.store.as_ref()).create(key, batch) {
            Ok(posts) => posts,
            Err(err) => {
                self.metrics.increment_batches_rejected();
                return Err(err);
            }
        };

        if !posts.is_empty() {
            self.metrics.record_batch(posts.len() as u64);
            let thread = key.to_string();
            let count = posts.len().to_string();
            let first = posts[0].id.to_string();
            log_event_with_fields(
                Event::PostsCreated,
                &[
                    ("thread", thread.as_str()),
                    ("count", count.as_str()),
                    ("first_id", first.as_str()),
                ],
            );
        }
        Ok(posts)
    }

    /// Replaces a post's message.
    ///
    /// An empty message, or one equal to the stored text, leaves the post
    /// untouched.
    pub fn update_post(&self, id: u64, message: &str) -> ForumResult<Post> {
        let post = self
            .store
            .find_post(id)?
            .ok_or(ForumError::PostNotFound(id))?;

        if message.is_empty() || message == post.message {
            return Ok(post);
        }

        let updated = self
            .store
            .update_post_message(id, message)?
            .ok_or(ForumError::PostNotFound(id))?;

        self.metrics.increment_posts_updated();
        let post_id = id.to_string();
        log_event_with_fields(Event::PostUpdated, &[("id", post_id.as_str())]);
        Ok(updated)
    }

    /// Fetches a post with the requested related entities.
    pub fn select_post(&self, id: u64, related: &[Related]) -> ForumResult<PostDetails> {
        let post = self
            .store
            .find_post(id)?
            .ok_or(ForumError::PostNotFound(id))?;

        let mut details = PostDetails {
            post,
            author: None,
            forum: None,
            thread: None,
        };

        for relation in related {
            match relation {
                Related::User => {
                    let author = &details.post.author;
                    details.author = Some(
                        self.store
                            .find_user(author)?
                            .ok_or_else(|| ForumError::UserNotFound(author.clone()))?,
                    );
                }
                Related::Forum => {
                    let slug = &details.post.forum;
                    details.forum = Some(
                        self.store
                            .find_forum(slug)?
                            .ok_or_else(|| ForumError::ForumNotFound(slug.clone()))?,
                    );
                }
                Related::Thread => {
                    let thread_id = details.post.thread;
                    details.thread = Some(
                        self.store
                            .find_thread(&ThreadKey::Id(thread_id))?
                            .ok_or_else(|| ForumError::ThreadNotFound(thread_id.to_string()))?,
                    );
                }
            }
        }

        self.metrics.increment_posts_read();
        Ok(details)
    }

    /// Lists a thread's posts in the requested order.
    pub fn select_thread_posts(
        &self,
        key: &ThreadKey,
        page: &PageRequest,
    ) -> ForumResult<Vec<Post>> {
        let thread = self
            .store
            .find_thread(key)?
            .ok_or_else(|| ForumError::ThreadNotFound(key.to_string()))?;

        let mut page = page.clone();
        page.limit = page.limit.min(self.max_page_size);

        let posts = order_posts(self.store.thread_posts(thread.id)?, &page);

        self.metrics.increment_listings();
        let thread_id = thread.id.to_string();
        let count = posts.len().to_string();
        Logger::trace(
            Event::ThreadPostsListed.as_str(),
            &[
                ("thread", thread_id.as_str()),
                ("sort", page.sort.as_str()),
                ("count", count.as_str()),
            ],
        );
        Ok(posts)
    }

    /// Row counts of the underlying store
    pub fn status(&self) -> ForumResult<StoreStatus> {
        self.store.status()
    }
}
