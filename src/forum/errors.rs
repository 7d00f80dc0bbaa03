//! # Forum Errors
//!
//! Error types shared by the ordering engine, the bulk creation engine and
//! the storage collaborator.

use std::fmt;

use thiserror::Error;

/// Result type for forum operations
pub type ForumResult<T> = Result<T, ForumError>;

/// Coarse error classification used by the response mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed required input
    BadRequest,
    /// Referenced thread, post, forum or author is absent
    NotFound,
    /// Referential or uniqueness violation
    Conflict,
    /// Anything else, e.g. a storage failure
    Internal,
}

impl ErrorKind {
    /// Textual description returned to clients
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal error",
        }
    }

    /// Code used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Forum domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForumError {
    // ==================
    // Missing references
    // ==================
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Forum not found: {0}")]
    ForumNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(u64),

    // ==================
    // Conflicts
    // ==================
    /// Parent post is missing or lives in another thread
    #[error("Parent post {parent} does not belong to thread {thread}")]
    ParentConflict { parent: u64, thread: u64 },

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // ==================
    // Storage
    // ==================
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ForumError {
    /// Classify this error for status mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForumError::ThreadNotFound(_)
            | ForumError::UserNotFound(_)
            | ForumError::ForumNotFound(_)
            | ForumError::PostNotFound(_) => ErrorKind::NotFound,
            ForumError::ParentConflict { .. } | ForumError::AlreadyExists(_) => {
                ErrorKind::Conflict
            }
            ForumError::Storage(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn lock_poisoned() -> Self {
        ForumError::Storage("Lock poisoned".to_string())
    }
}
