use crate::{Error, EventId, Time, UserSummary};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub i64);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(0)
    }
}

/// One node of an event's comment forest, as served by the backend: the
/// top-level listing endpoint returns these with `replies` already
/// nested, recursively in the same shape.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub created_at: Time,
    pub author: UserSummary,

    /// None for a top-level comment on the event. Never changes once set.
    #[serde(default)]
    pub parent_id: Option<CommentId>,

    /// Direct replies, in reply order. Every element's `parent_id` is
    /// this comment's `id`.
    #[serde(default)]
    pub replies: Vec<Comment>,

    pub like_count: u32,
    pub dislike_count: u32,

    /// Whether the viewing user has this reaction on the comment. At
    /// most one of the two is true at any time.
    #[serde(default)]
    pub liked_by_current_user: bool,
    #[serde(default)]
    pub disliked_by_current_user: bool,
}

impl Comment {
    /// Popularity score used for the "popularity" sort order.
    pub fn score(&self) -> i64 {
        self.like_count as i64 - self.dislike_count as i64
    }
}

/// Body of the comment-creation endpoint. `parent_comment` is set for
/// replies and absent for top-level comments.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub event: EventId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment: Option<CommentId>,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_content(&self.content)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Path segment of the toggle endpoint for this reaction.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

/// What the server did with a reaction toggle. Both toggle endpoints
/// share the `removed` value; the request kind says which reaction got
/// removed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionStatus {
    Liked,
    Disliked,
    Removed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ReactionResponse {
    pub status: ReactionStatus,
}
