//! Post HTTP Routes
//!
//! - `GET  /post/{id}/details?related=user,forum,thread`
//! - `POST /post/{id}/details` with `{"message": "..."}`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use super::params::{parse_post_id, parse_related, PostDetailsQuery};
use crate::forum::{Post, PostDetails, PostService};

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub message: String,
}

/// Create post routes
pub fn post_routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route(
            "/post/:id/details",
            get(get_post_details_handler).post(update_post_handler),
        )
        .with_state(service)
}

async fn get_post_details_handler(
    State(service): State<Arc<PostService>>,
    Path(id): Path<String>,
    query: Result<Query<PostDetailsQuery>, QueryRejection>,
) -> ApiResult<Json<PostDetails>> {
    let id = parse_post_id(&id)?;
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let related = parse_related(query.related.as_deref())?;

    let details = service.select_post(id, &related)?;
    Ok(Json(details))
}

async fn update_post_handler(
    State(service): State<Arc<PostService>>,
    Path(id): Path<String>,
    body: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> ApiResult<Json<Post>> {
    let id = parse_post_id(&id)?;
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let post = service.update_post(id, &request.message)?;
    Ok(Json(post))
}
