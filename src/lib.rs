//! forumd - A forum discussion service with hierarchical post ordering
//!
//! Posts belong to threads and form reply trees. Listings come in three
//! orders: chronological, depth-first tree, and paginated by root.

pub mod cli;
pub mod forum;
pub mod http_server;
pub mod observability;
