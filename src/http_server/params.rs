//! # Request Parameter Validation
//!
//! Parses and normalizes query and path parameters before any business
//! logic runs. `since`, `related` and the post id are strict; `limit`,
//! `desc` and `sort` fall back to defaults instead of failing.

use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use crate::forum::{PageRequest, Related, SortMode, DEFAULT_LIMIT};

/// Raw query of `GET /thread/{slug_or_id}/posts`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadPostsQuery {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl ThreadPostsQuery {
    /// Validate into a page request
    pub fn into_page(self) -> ApiResult<PageRequest> {
        Ok(PageRequest {
            limit: parse_limit(self.limit.as_deref()),
            since: parse_since(self.since.as_deref())?,
            desc: parse_desc(self.desc.as_deref()),
            sort: SortMode::parse_lenient(self.sort.as_deref()),
        })
    }
}

/// Raw query of `GET /post/{id}/details`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDetailsQuery {
    #[serde(default)]
    pub related: Option<String>,
}

/// Positive page size, or the default
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .and_then(|limit| usize::try_from(limit).ok())
        .unwrap_or(DEFAULT_LIMIT)
}

/// Exclusive cursor; an empty value counts as absent
pub fn parse_since(raw: Option<&str>) -> ApiResult<Option<i64>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("Invalid since: {}", value))),
    }
}

/// Boolean flag; anything unrecognized is `false`
pub fn parse_desc(raw: Option<&str>) -> bool {
    matches!(raw, Some("1" | "t" | "T" | "TRUE" | "true" | "True"))
}

/// Comma-separated related entities; any unknown element fails the request
pub fn parse_related(raw: Option<&str>) -> ApiResult<Vec<Related>> {
    match raw {
        None | Some("") => Ok(Vec::new()),
        Some(value) => value
            .split(',')
            .map(|element| {
                Related::parse(element)
                    .ok_or_else(|| ApiError::bad_request(format!("Invalid related: {}", element)))
            })
            .collect(),
    }
}

/// Numeric post id from the path
pub fn parse_post_id(raw: &str) -> ApiResult<u64> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::bad_request(format!("Invalid post id: {}", raw)))
}
