use crate::api::{Comment, ReactionKind, ReactionStatus};

/// Applies the server's answer to a reaction toggle to the local copy of
/// the comment. Only called once a successful response is in hand: the
/// click itself never touches local state, so a failed request leaves
/// the pre-click values on screen with nothing to roll back.
///
/// `kind` is the reaction the request toggled; it disambiguates the
/// shared `removed` status. A status naming the opposite reaction means
/// the server answered a racing toggle, and is applied as that reaction
/// rather than dropped. Counters saturate instead of underflowing:
/// racing toggles can leave the local count drifted from the server's
/// until the next full reload, and a drifted count must not wrap.
pub fn apply_reaction(comment: &mut Comment, kind: ReactionKind, status: ReactionStatus) {
    match status {
        ReactionStatus::Liked => {
            if !comment.liked_by_current_user {
                comment.like_count += 1;
            }
            if comment.disliked_by_current_user {
                comment.dislike_count = comment.dislike_count.saturating_sub(1);
            }
            comment.liked_by_current_user = true;
            comment.disliked_by_current_user = false;
        }
        ReactionStatus::Disliked => {
            if !comment.disliked_by_current_user {
                comment.dislike_count += 1;
            }
            if comment.liked_by_current_user {
                comment.like_count = comment.like_count.saturating_sub(1);
            }
            comment.disliked_by_current_user = true;
            comment.liked_by_current_user = false;
        }
        ReactionStatus::Removed => match kind {
            ReactionKind::Like => {
                if comment.liked_by_current_user {
                    comment.like_count = comment.like_count.saturating_sub(1);
                }
                comment.liked_by_current_user = false;
            }
            ReactionKind::Dislike => {
                if comment.disliked_by_current_user {
                    comment.dislike_count = comment.dislike_count.saturating_sub(1);
                }
                comment.disliked_by_current_user = false;
            }
        },
    }
}
