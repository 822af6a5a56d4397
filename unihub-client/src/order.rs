use std::cmp::Reverse;

use crate::api::Comment;

/// Sort orders for the top level of a comment forest. Replies always
/// keep their insertion order, whatever the mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortMode {
    /// Newest first.
    Time,
    /// Highest like-dislike score first, newest first among ties.
    Popularity,
}

impl SortMode {
    /// Ties left over after the mode's own keys break on id, so the
    /// result is deterministic.
    pub fn sort(&self, comments: &mut [Comment]) {
        match self {
            SortMode::Time => comments.sort_unstable_by_key(|c| (Reverse(c.created_at), c.id)),
            SortMode::Popularity => comments
                .sort_unstable_by_key(|c| (Reverse(c.score()), Reverse(c.created_at), c.id)),
        }
    }
}

/// Number of pages needed to show `total` comments `page_size` at a time.
pub fn page_count(total: usize, page_size: usize) -> usize {
    match page_size {
        0 => 0,
        s => (total + s - 1) / s,
    }
}

/// The paginated slice of top-level comments to display: sorted by
/// `mode`, then cut to the 1-indexed `page`. Pure over the forest, so
/// safe to call on every render; pages past the end come back empty
/// rather than panicking.
pub fn rank(forest: &[Comment], mode: SortMode, page_size: usize, page: usize) -> Vec<Comment> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let mut sorted = forest.to_vec();
    mode.sort(&mut sorted);
    let start = (page - 1).saturating_mul(page_size).min(sorted.len());
    let end = page.saturating_mul(page_size).min(sorted.len());
    sorted[start..end].to_vec()
}
