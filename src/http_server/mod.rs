//! # forumd HTTP Server Module
//!
//! Axum server exposing the post API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/post/{id}/details` - Fetch or edit a post
//! - `/api/thread/{slug_or_id}/create` - Create a batch of posts
//! - `/api/thread/{slug_or_id}/posts` - List a thread's posts
//! - `/api/service/status` - Store row counts
//! - `/observability/metrics` - Counters

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod params;
pub mod post_routes;
pub mod server;
pub mod thread_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
