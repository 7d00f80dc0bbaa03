//! Post ordering engine
//!
//! Orders and paginates a snapshot of a thread's posts in one of three modes:
//!
//! - `flat`: chronological by `(created, id)`
//! - `tree`: pre-order depth-first by ordering path
//! - `parent_tree`: pages over top-level posts, each followed by its subtree
//!
//! The `since` cursor is exclusive. A cursor that names a post outside the
//! thread does not move the page start.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::model::Post;

/// Default page size when the client gives none
pub const DEFAULT_LIMIT: usize = 100;

/// Listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Flat,
    Tree,
    ParentTree,
}

impl SortMode {
    /// Parse a sort mode, falling back to `Flat` for anything unknown
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some("tree") => SortMode::Tree,
            Some("parent_tree") => SortMode::ParentTree,
            _ => SortMode::Flat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Flat => "flat",
            SortMode::Tree => "tree",
            SortMode::ParentTree => "parent_tree",
        }
    }
}

/// Pagination and ordering parameters for a thread listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    /// Exclusive cursor: id of the last post of the previous page
    pub since: Option<i64>,
    pub desc: bool,
    pub sort: SortMode,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            since: None,
            desc: false,
            sort: SortMode::Flat,
        }
    }
}

impl PageRequest {
    pub fn new(sort: SortMode) -> Self {
        Self {
            sort,
            ..Default::default()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }

    pub fn desc(mut self, desc: bool) -> Self {
        self.desc = desc;
        self
    }

    fn cursor(&self) -> Option<u64> {
        self.since.and_then(|since| u64::try_from(since).ok())
    }
}

/// Orders and paginates the posts of one thread.
pub fn order_posts(posts: Vec<Post>, page: &PageRequest) -> Vec<Post> {
    match page.sort {
        SortMode::Flat => flat(posts, page),
        SortMode::Tree => tree(posts, page),
        SortMode::ParentTree => parent_tree(posts, page),
    }
}

fn flat_cmp(a: &Post, b: &Post, desc: bool) -> Ordering {
    let ordering = (a.created, a.id).cmp(&(b.created, b.id));
    if desc {
        ordering.reverse()
    } else {
        ordering
    }
}

fn flat(mut posts: Vec<Post>, page: &PageRequest) -> Vec<Post> {
    posts.sort_by(|a, b| flat_cmp(a, b, page.desc));
    paginate(posts, page)
}

fn tree(mut posts: Vec<Post>, page: &PageRequest) -> Vec<Post> {
    posts.sort_by(|a, b| a.path.tree_cmp(&b.path, page.desc));
    paginate(posts, page)
}

/// Drops everything up to and including the cursor, then takes `limit`.
fn paginate(posts: Vec<Post>, page: &PageRequest) -> Vec<Post> {
    let start = page
        .cursor()
        .and_then(|cursor| posts.iter().position(|post| post.id == cursor))
        .map_or(0, |index| index + 1);

    posts.into_iter().skip(start).take(page.limit).collect()
}

fn parent_tree(posts: Vec<Post>, page: &PageRequest) -> Vec<Post> {
    let cursor_root = page.cursor().and_then(|cursor| {
        posts
            .iter()
            .find(|post| post.id == cursor)
            .and_then(|post| post.path.root_id())
    });

    let mut roots = Vec::new();
    let mut replies: HashMap<u64, Vec<Post>> = HashMap::new();
    for post in posts {
        if post.path.is_root() {
            roots.push(post);
        } else if let Some(root_id) = post.path.root_id() {
            replies.entry(root_id).or_default().push(post);
        }
    }

    roots.sort_by(|a, b| flat_cmp(a, b, page.desc));
    let start = cursor_root
        .and_then(|root_id| roots.iter().position(|root| root.id == root_id))
        .map_or(0, |index| index + 1);

    let mut result = Vec::new();
    for root in roots.into_iter().skip(start).take(page.limit) {
        let mut subtree = replies.remove(&root.id).unwrap_or_default();
        subtree.sort_by(|a, b| a.path.tree_cmp(&b.path, false));
        result.push(root);
        result.extend(subtree);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forum::path::{build_path, PostPath};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    /// Builds posts from (id, parent, minutes after base) triples.
    fn thread(specs: &[(u64, Option<u64>, i64)]) -> Vec<Post> {
        let mut paths: HashMap<u64, PostPath> = HashMap::new();
        specs
            .iter()
            .map(|&(id, parent, minutes)| {
                let path = build_path(parent.and_then(|p| paths.get(&p)), id);
                paths.insert(id, path.clone());
                Post {
                    id,
                    parent,
                    author: "alice".to_string(),
                    message: format!("m{}", id),
                    is_edited: false,
                    forum: "rust".to_string(),
                    thread: 1,
                    created: base_time() + Duration::minutes(minutes),
                    path,
                }
            })
            .collect()
    }

    fn ids(posts: &[Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    //   1          (t0)
    //   ├─ 3       (t1)
    //   │  └─ 5    (t2)
    //   └─ 4       (t1)
    //   2          (t0)
    //   └─ 6       (t2)
    fn sample() -> Vec<Post> {
        thread(&[
            (1, None, 0),
            (2, None, 0),
            (3, Some(1), 1),
            (4, Some(1), 1),
            (5, Some(3), 2),
            (6, Some(2), 2),
        ])
    }

    #[test]
    fn test_sort_mode_lenient() {
        assert_eq!(SortMode::parse_lenient(Some("tree")), SortMode::Tree);
        assert_eq!(SortMode::parse_lenient(Some("parent_tree")), SortMode::ParentTree);
        assert_eq!(SortMode::parse_lenient(Some("TREE")), SortMode::Flat);
        assert_eq!(SortMode::parse_lenient(None), SortMode::Flat);
    }

    #[test]
    fn test_flat_ascending_and_descending() {
        let asc = order_posts(sample(), &PageRequest::new(SortMode::Flat));
        assert_eq!(ids(&asc), vec![1, 2, 3, 4, 5, 6]);

        let desc = order_posts(sample(), &PageRequest::new(SortMode::Flat).desc(true));
        assert_eq!(ids(&desc), vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_flat_timestamp_before_id() {
        // Post 7 has a lower id but a later timestamp than post 8
        let posts = thread(&[(8, None, 0), (7, None, 5)]);
        let asc = order_posts(posts, &PageRequest::new(SortMode::Flat));
        assert_eq!(ids(&asc), vec![8, 7]);
    }

    #[test]
    fn test_flat_since_is_exclusive() {
        let page = PageRequest::new(SortMode::Flat).since(3).limit(2);
        assert_eq!(ids(&order_posts(sample(), &page)), vec![4, 5]);

        let page = PageRequest::new(SortMode::Flat).since(3).desc(true);
        assert_eq!(ids(&order_posts(sample(), &page)), vec![2, 1]);
    }

    #[test]
    fn test_tree_ascending() {
        let posts = order_posts(sample(), &PageRequest::new(SortMode::Tree));
        assert_eq!(ids(&posts), vec![1, 3, 5, 4, 2, 6]);
    }

    #[test]
    fn test_tree_descending_keeps_parent_first() {
        let posts = order_posts(sample(), &PageRequest::new(SortMode::Tree).desc(true));
        assert_eq!(ids(&posts), vec![2, 6, 1, 4, 3, 5]);
    }

    #[test]
    fn test_tree_since() {
        let page = PageRequest::new(SortMode::Tree).since(5).limit(2);
        assert_eq!(ids(&order_posts(sample(), &page)), vec![4, 2]);

        let page = PageRequest::new(SortMode::Tree).since(1).desc(true);
        assert_eq!(ids(&order_posts(sample(), &page)), vec![4, 3, 5]);
    }

    #[test]
    fn test_parent_tree_pages_over_roots() {
        let page = PageRequest::new(SortMode::ParentTree).limit(1);
        assert_eq!(ids(&order_posts(sample(), &page)), vec![1, 3, 5, 4]);

        let page = PageRequest::new(SortMode::ParentTree).limit(1).desc(true);
        assert_eq!(ids(&order_posts(sample(), &page)), vec![2, 6]);
    }

    #[test]
    fn test_parent_tree_since_uses_cursor_root() {
        // Cursor 5 lives under root 1, so the next page starts at root 2
        let page = PageRequest::new(SortMode::ParentTree).since(5);
        assert_eq!(ids(&order_posts(sample(), &page)), vec![2, 6]);

        let page = PageRequest::new(SortMode::ParentTree).since(2).desc(true);
        assert_eq!(ids(&order_posts(sample(), &page)), vec![1, 3, 5, 4]);
    }

    #[test]
    fn test_unknown_cursor_starts_from_beginning() {
        for sort in [SortMode::Flat, SortMode::Tree, SortMode::ParentTree] {
            let unbounded = order_posts(sample(), &PageRequest::new(sort));
            let missing = order_posts(sample(), &PageRequest::new(sort).since(999));
            let negative = order_posts(sample(), &PageRequest::new(sort).since(-4));
            assert_eq!(ids(&unbounded), ids(&missing), "mode {}", sort.as_str());
            assert_eq!(ids(&unbounded), ids(&negative), "mode {}", sort.as_str());
        }
    }

    #[test]
    fn test_empty_thread() {
        for sort in [SortMode::Flat, SortMode::Tree, SortMode::ParentTree] {
            assert!(order_posts(Vec::new(), &PageRequest::new(sort).since(1)).is_empty());
        }
    }

    #[test]
    fn test_limit_truncates() {
        let page = PageRequest::new(SortMode::Tree).limit(3);
        assert_eq!(order_posts(sample(), &page).len(), 3);
        let page = PageRequest::new(SortMode::Flat).limit(0);
        assert!(order_posts(sample(), &page).is_empty());
    }
}
