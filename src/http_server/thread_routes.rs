//! Thread HTTP Routes
//!
//! - `POST /thread/{slug_or_id}/create` with a JSON array of posts
//! - `GET  /thread/{slug_or_id}/posts?limit&since&sort&desc`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use super::params::ThreadPostsQuery;
use crate::forum::{NewPost, Post, PostService, ThreadKey};

/// Create thread routes
pub fn thread_routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/thread/:slug_or_id/create", post(create_posts_handler))
        .route("/thread/:slug_or_id/posts", get(thread_posts_handler))
        .with_state(service)
}

async fn create_posts_handler(
    State(service): State<Arc<PostService>>,
    Path(slug_or_id): Path<String>,
    body: Result<Json<Vec<NewPost>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Vec<Post>>)> {
    let Json(batch) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let posts = service.create_posts(&ThreadKey::parse(&slug_or_id), batch)?;
    Ok((StatusCode::CREATED, Json(posts)))
}

async fn thread_posts_handler(
    State(service): State<Arc<PostService>>,
    Path(slug_or_id): Path<String>,
    query: Result<Query<ThreadPostsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Post>>> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let page = query.into_page()?;

    let posts = service.select_thread_posts(&ThreadKey::parse(&slug_or_id), &page)?;
    Ok(Json(posts))
}
