//! # Forum Module
//!
//! Posts, threads and the engines that order and create them.
//!
//! - [`ordering`]: flat / tree / parent_tree listings with `since` cursors
//! - [`bulk`]: validated, all-or-nothing batch creation
//! - [`path`]: ordering paths backing the tree modes
//! - [`store`]: storage collaborator trait and the in-memory store
//! - [`service`]: the operations exposed over HTTP

pub mod bulk;
pub mod errors;
pub mod fixtures;
pub mod model;
pub mod ordering;
pub mod path;
pub mod service;
pub mod store;

pub use bulk::BulkCreator;
pub use errors::{ErrorKind, ForumError, ForumResult};
pub use fixtures::{FixtureSummary, Fixtures};
pub use model::{
    Forum, NewPost, NewThread, Post, PostDetails, Related, StoreStatus, Thread, ThreadKey, User,
};
pub use ordering::{order_posts, PageRequest, SortMode, DEFAULT_LIMIT};
pub use path::{build_path, PostPath};
pub use service::{PostService, DEFAULT_MAX_PAGE_SIZE};
pub use store::{BatchReservation, ForumStore, MemoryStore};
