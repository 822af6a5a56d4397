use anyhow::{anyhow, Context};
use serde_json::json;

use crate::{CommentId, EventId};

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Event {0:?} does not exist")]
    EventNotFound(EventId),

    #[error("Comment {0:?} does not exist")]
    CommentNotFound(CommentId),

    #[error("Comment content is empty")]
    EmptyContent,
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PermissionDenied => StatusCode::FORBIDDEN,
            Error::EventNotFound(_) => StatusCode::NOT_FOUND,
            Error::CommentNotFound(_) => StatusCode::NOT_FOUND,
            Error::EmptyContent => StatusCode::BAD_REQUEST,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::PermissionDenied => json!({
                "message": "permission denied",
                "type": "permission-denied",
            }),
            Error::EventNotFound(e) => json!({
                "message": "event not found",
                "type": "event-not-found",
                "event": e.0,
            }),
            Error::CommentNotFound(c) => json!({
                "message": "comment not found",
                "type": "comment-not-found",
                "comment": c.0,
            }),
            Error::EmptyContent => json!({
                "message": "comment content is empty",
                "type": "empty-content",
            }),
        })
        .expect("serializing error contents")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(String::from(
                    data.get("message")
                        .and_then(|msg| msg.as_str())
                        .unwrap_or(""),
                )),
                "permission-denied" => Error::PermissionDenied,
                "event-not-found" => Error::EventNotFound(EventId(
                    data.get("event").and_then(|e| e.as_i64()).ok_or_else(|| {
                        anyhow!("error is about a missing event but has no event id")
                    })?,
                )),
                "comment-not-found" => Error::CommentNotFound(CommentId(
                    data.get("comment")
                        .and_then(|c| c.as_i64())
                        .ok_or_else(|| {
                            anyhow!("error is about a missing comment but has no comment id")
                        })?,
                )),
                "empty-content" => Error::EmptyContent,
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}
