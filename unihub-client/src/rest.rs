use anyhow::{anyhow, Context};
use async_trait::async_trait;

use crate::{
    api::{self, Comment, CommentId, EventId, NewComment, ReactionKind, ReactionResponse},
    CommentsApi,
};

/// [`CommentsApi`] over the real backend's REST endpoints.
pub struct RestApi {
    host: String,
    client: reqwest::Client,
}

impl RestApi {
    /// `host` is the scheme-and-authority part, e.g.
    /// `https://unihub.example.org`, with no trailing slash.
    pub fn new(host: impl Into<String>) -> RestApi {
        RestApi {
            host: host.into(),
            client: reqwest::Client::new(),
        }
    }
}

/// Decodes a successful body as JSON; a non-2xx answer is turned into
/// the wire [`api::Error`] when the body carries one.
async fn parse_response<R>(resp: reqwest::Response) -> anyhow::Result<R>
where
    R: for<'de> serde::Deserialize<'de>,
{
    let status = resp.status();
    if !status.is_success() {
        let body = resp.bytes().await.context("reading error response")?;
        return Err(match api::Error::parse(&body) {
            Ok(e) => anyhow::Error::new(e),
            Err(_) => anyhow!("server answered {status} with an unparseable error body"),
        });
    }
    resp.json().await.context("parsing response from server")
}

#[async_trait]
impl CommentsApi for RestApi {
    async fn list_comments(&self, event: EventId) -> anyhow::Result<Vec<Comment>> {
        let resp = self
            .client
            .get(format!("{}/api/comments/", self.host))
            .query(&[("event_id", event.0)])
            .send()
            .await
            .context("fetching comments")?;
        parse_response(resp).await
    }

    async fn create_comment(&self, comment: NewComment) -> anyhow::Result<Comment> {
        let resp = self
            .client
            .post(format!("{}/api/comments/", self.host))
            .query(&[("event_id", comment.event.0)])
            .json(&comment)
            .send()
            .await
            .context("submitting comment")?;
        parse_response(resp).await
    }

    async fn react(
        &self,
        comment: CommentId,
        kind: ReactionKind,
    ) -> anyhow::Result<ReactionResponse> {
        let resp = self
            .client
            .post(format!(
                "{}/api/comments/{}/{}/",
                self.host,
                comment.0,
                kind.as_str()
            ))
            .send()
            .await
            .context("toggling reaction")?;
        parse_response(resp).await
    }
}
