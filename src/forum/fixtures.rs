//! Fixture loading
//!
//! Users, forums and threads are managed outside this service. A fixtures
//! file seeds them into the store at boot:
//!
//! ```json
//! {
//!   "users":   [{"nickname": "alice", "email": "alice@example.com"}],
//!   "forums":  [{"slug": "rust", "title": "Rust", "user": "alice"}],
//!   "threads": [{"title": "General", "author": "alice", "forum": "rust",
//!                "message": "Welcome", "slug": "general"}]
//! }
//! ```
//!
//! Records are applied in that order, so forums may reference users and
//! threads may reference both.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::{ForumError, ForumResult};
use super::model::{Forum, NewThread, User};
use super::store::ForumStore;

/// Seed records for the external subsystems
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub forums: Vec<Forum>,
    #[serde(default)]
    pub threads: Vec<NewThread>,
}

/// Number of records applied per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub users: usize,
    pub forums: usize,
    pub threads: usize,
}

impl Fixtures {
    /// Read fixtures from a JSON file
    pub fn load(path: &Path) -> ForumResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ForumError::Storage(format!("Failed to read fixtures {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ForumResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| ForumError::Storage(format!("Invalid fixtures JSON: {}", e)))
    }

    /// Insert every record, stopping at the first failure
    pub fn apply(self, store: &dyn ForumStore) -> ForumResult<FixtureSummary> {
        let summary = FixtureSummary {
            users: self.users.len(),
            forums: self.forums.len(),
            threads: self.threads.len(),
        };

        for user in self.users {
            store.insert_user(user)?;
        }
        for forum in self.forums {
            store.insert_forum(forum)?;
        }
        for thread in self.threads {
            store.insert_thread(thread)?;
        }

        Ok(summary)
    }
}
