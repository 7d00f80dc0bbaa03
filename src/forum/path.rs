//! Ordering paths for hierarchical post ordering
//!
//! Every post stores the ids of its ancestors followed by its own id.
//! Comparing two paths segment by segment yields a pre-order depth-first
//! traversal of the reply tree, so tree listings never walk parent links.

use std::cmp::Ordering;

/// Ancestor ids plus own id, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PostPath(Vec<u64>);

impl PostPath {
    /// Path of a top-level post
    pub fn root(id: u64) -> Self {
        PostPath(vec![id])
    }

    /// Path of a reply: the parent's stored path extended by `id`
    pub fn child_of(parent: &PostPath, id: u64) -> Self {
        let mut segments = Vec::with_capacity(parent.0.len() + 1);
        segments.extend_from_slice(&parent.0);
        segments.push(id);
        PostPath(segments)
    }

    /// Id of the top-level post this path descends from
    pub fn root_id(&self) -> Option<u64> {
        self.0.first().copied()
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// True when `self` is `parent` plus exactly one segment
    pub fn extends(&self, parent: &PostPath) -> bool {
        self.0.len() == parent.0.len() + 1 && self.0.starts_with(&parent.0)
    }

    /// Compares two paths in tree order.
    ///
    /// The first differing segment decides, ascending or descending per
    /// `desc`. An ancestor always sorts before its descendants, in both
    /// directions.
    pub fn tree_cmp(&self, other: &PostPath, desc: bool) -> Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                ordering if desc => return ordering.reverse(),
                ordering => return ordering,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

/// Builds the ordering path for a new post from its parent's stored path.
pub fn build_path(parent: Option<&PostPath>, id: u64) -> PostPath {
    match parent {
        Some(parent) => PostPath::child_of(parent, id),
        None => PostPath::root(id),
    }
}
