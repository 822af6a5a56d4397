//! Pure operations over a comment forest: the ordered top-level comments
//! of one event, each the root of its own reply tree.

use crate::api::{Comment, CommentId};

/// Depth-first search across all top-level comments and their nested
/// replies. Ids are unique across a forest, so the first match is the
/// only one. O(n) over the total comment count; forests are tens to low
/// hundreds of nodes, so no index is kept and recursion depth (bounded
/// by reply nesting) is not a concern.
pub fn find_in(forest: &[Comment], id: CommentId) -> Option<&Comment> {
    for c in forest {
        if c.id == id {
            return Some(c);
        }
        if let Some(res) = find_in(&c.replies, id) {
            return Some(res);
        }
    }
    None
}

pub fn find_in_mut(forest: &mut [Comment], id: CommentId) -> Option<&mut Comment> {
    for c in forest {
        if c.id == id {
            return Some(c);
        }
        if let Some(res) = find_in_mut(&mut c.replies, id) {
            return Some(res);
        }
    }
    None
}

/// Appends `reply` at the end of the replies of the comment with id
/// `parent`, wherever it sits in the forest (replies-to-replies work the
/// same as replies to top-level comments). Returns false and leaves the
/// forest untouched when no such parent exists; callers only pass ids of
/// already-rendered comments, so they treat that as a defensive no-op.
pub fn insert_reply(forest: &mut [Comment], parent: CommentId, reply: Comment) -> bool {
    match find_in_mut(forest, parent) {
        Some(p) => {
            p.replies.push(reply);
            true
        }
        None => false,
    }
}

/// Total number of comments in the forest, replies included.
pub fn count(forest: &[Comment]) -> usize {
    forest.iter().map(|c| 1 + count(&c.replies)).sum()
}
