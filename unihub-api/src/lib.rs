use chrono::Utc;

pub type Time = chrono::DateTime<Utc>;

mod comment;
pub use comment::{
    Comment, CommentId, NewComment, ReactionKind, ReactionResponse, ReactionStatus,
};

mod error;
pub use error::Error;

mod event;
pub use event::EventId;

mod user;
pub use user::{UserId, UserSummary};

/// The backend rejects blank comments; the client checks the same
/// condition before sending anything over the wire.
pub fn validate_content(content: &str) -> Result<(), Error> {
    if content.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    Ok(())
}
