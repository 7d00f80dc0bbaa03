//! Forum data model
//!
//! Users, forums and threads are owned by other subsystems and only read
//! here. Posts are created by the bulk creation engine and never deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::path::PostPath;

/// A forum member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub nickname: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub about: String,
    pub email: String,
}

/// A forum grouping threads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forum {
    pub slug: String,
    pub title: String,
    /// Owner nickname
    pub user: String,
    #[serde(default)]
    pub posts: u64,
    #[serde(default)]
    pub threads: u64,
}

/// A discussion container owning posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thread {
    pub id: u64,
    pub title: String,
    pub author: String,
    /// Forum slug
    pub forum: String,
    pub message: String,
    pub votes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub created: DateTime<Utc>,
}

/// Thread as supplied by fixtures, before an id is assigned
#[derive(Debug, Clone, Deserialize)]
pub struct NewThread {
    pub title: String,
    pub author: String,
    pub forum: String,
    pub message: String,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// A stored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    pub author: String,
    pub message: String,
    pub is_edited: bool,
    /// Forum slug, copied from the thread
    pub forum: String,
    pub thread: u64,
    pub created: DateTime<Utc>,
    #[serde(skip)]
    pub path: PostPath,
}

impl Post {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A post candidate in a creation batch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPost {
    pub author: String,
    /// Zero or absent means top-level
    #[serde(default)]
    pub parent: Option<u64>,
    pub message: String,
}

impl NewPost {
    pub fn new(author: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            parent: None,
            message: message.into(),
        }
    }

    pub fn reply_to(mut self, parent: u64) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Parent id with zero normalized away
    pub fn parent_id(&self) -> Option<u64> {
        self.parent.filter(|id| *id != 0)
    }
}

/// Thread reference as it appears in a URL: numeric id or slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadKey {
    Id(u64),
    Slug(String),
}

impl ThreadKey {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<u64>() {
            Ok(id) => ThreadKey::Id(id),
            Err(_) => ThreadKey::Slug(raw.to_string()),
        }
    }
}

impl fmt::Display for ThreadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadKey::Id(id) => write!(f, "{}", id),
            ThreadKey::Slug(slug) => write!(f, "{}", slug),
        }
    }
}

/// Related entity that can be expanded next to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Related {
    User,
    Forum,
    Thread,
}

impl Related {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Related::User),
            "forum" => Some(Related::Forum),
            "thread" => Some(Related::Thread),
            _ => None,
        }
    }
}

/// A post with its requested related entities
#[derive(Debug, Clone, Serialize)]
pub struct PostDetails {
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum: Option<Forum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
}

/// Row counts reported by the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub user: u64,
    pub forum: u64,
    pub thread: u64,
    pub post: u64,
}
