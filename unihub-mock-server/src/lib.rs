use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use chrono::{TimeZone, Utc};
use unihub_client::{
    api::{
        Comment, CommentId, Error, EventId, NewComment, ReactionKind, ReactionResponse,
        ReactionStatus, Time, UserId, UserSummary,
    },
    forest, CommentsApi,
};

/// In-memory stand-in for the backend's comment endpoints. There is a
/// single viewing user; the reaction flags on stored comments are that
/// user's.
pub struct MockServer {
    viewer: UserSummary,
    events: BTreeMap<EventId, Vec<Comment>>,
    next_comment_id: i64,
    // created_at strictly increases per created comment, so that
    // chronological ordering is deterministic in tests
    clock: i64,
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            viewer: UserSummary {
                id: UserId(1),
                username: String::from("tester"),
                icon: None,
            },
            events: BTreeMap::new(),
            next_comment_id: 1,
            clock: 0,
        }
    }

    /// Registers an event so comments can be attached to it.
    pub fn register_event(&mut self, event: EventId) {
        self.events.entry(event).or_insert_with(Vec::new);
    }

    /// Seeds a comment with preset counters, bypassing the creation
    /// endpoint. Panics if the event or parent does not exist.
    pub fn test_seed_comment(
        &mut self,
        event: EventId,
        parent: Option<CommentId>,
        content: &str,
        likes: u32,
        dislikes: u32,
    ) -> CommentId {
        let mut c = self
            .create_comment(NewComment {
                event,
                content: content.to_string(),
                parent_comment: parent,
            })
            .unwrap_or_else(|e| panic!("seeding comment on event {event:?}: {e}"));
        c.like_count = likes;
        c.dislike_count = dislikes;
        let id = c.id;
        let comments = self.events.get_mut(&event).expect("event seeded just above");
        *forest::find_in_mut(comments, id).expect("comment seeded just above") = c;
        id
    }

    fn tick(&mut self) -> Time {
        self.clock += 1;
        Utc.timestamp_opt(1_700_000_000 + self.clock, 0)
            .single()
            .expect("mock clock out of range")
    }

    pub fn list_comments(&self, event: EventId) -> Result<Vec<Comment>, Error> {
        match self.events.get(&event) {
            Some(comments) => Ok(comments.clone()),
            None => Err(Error::EventNotFound(event)),
        }
    }

    pub fn create_comment(&mut self, new: NewComment) -> Result<Comment, Error> {
        new.validate()?;
        let comments = self
            .events
            .get(&new.event)
            .ok_or(Error::EventNotFound(new.event))?;
        if let Some(parent) = new.parent_comment {
            if forest::find_in(comments, parent).is_none() {
                return Err(Error::CommentNotFound(parent));
            }
        }

        let created_at = self.tick();
        let comment = Comment {
            id: CommentId(self.next_comment_id),
            content: new.content,
            created_at,
            author: self.viewer.clone(),
            parent_id: new.parent_comment,
            replies: Vec::new(),
            like_count: 0,
            dislike_count: 0,
            liked_by_current_user: false,
            disliked_by_current_user: false,
        };
        self.next_comment_id += 1;

        let comments = self
            .events
            .get_mut(&new.event)
            .expect("event existence checked above");
        match new.parent_comment {
            None => comments.push(comment.clone()),
            Some(parent) => {
                forest::insert_reply(comments, parent, comment.clone());
            }
        }
        Ok(comment)
    }

    pub fn react(
        &mut self,
        comment: CommentId,
        kind: ReactionKind,
    ) -> Result<ReactionResponse, Error> {
        for comments in self.events.values_mut() {
            if let Some(c) = forest::find_in_mut(comments, comment) {
                let status = match kind {
                    ReactionKind::Like if c.liked_by_current_user => {
                        c.liked_by_current_user = false;
                        c.like_count -= 1;
                        ReactionStatus::Removed
                    }
                    ReactionKind::Like => {
                        if c.disliked_by_current_user {
                            c.disliked_by_current_user = false;
                            c.dislike_count -= 1;
                        }
                        c.liked_by_current_user = true;
                        c.like_count += 1;
                        ReactionStatus::Liked
                    }
                    ReactionKind::Dislike if c.disliked_by_current_user => {
                        c.disliked_by_current_user = false;
                        c.dislike_count -= 1;
                        ReactionStatus::Removed
                    }
                    ReactionKind::Dislike => {
                        if c.liked_by_current_user {
                            c.liked_by_current_user = false;
                            c.like_count -= 1;
                        }
                        c.disliked_by_current_user = true;
                        c.dislike_count += 1;
                        ReactionStatus::Disliked
                    }
                };
                return Ok(ReactionResponse { status });
            }
        }
        Err(Error::CommentNotFound(comment))
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

/// Shareable [`CommentsApi`] handle over a [`MockServer`]. The handle
/// counts every call (so tests can assert that validation skips never
/// reach the network) and can be flipped into a failing mode to exercise
/// the client's failure paths deterministically.
#[derive(Clone)]
pub struct MockApi {
    server: Arc<Mutex<MockServer>>,
    failing: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockApi {
    pub fn new(server: MockServer) -> MockApi {
        MockApi {
            server: Arc::new(Mutex::new(server)),
            failing: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// When failing, every call still counts but answers with an error
    /// before touching the server state.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub fn num_calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Direct access to the underlying server, for seeding and for
    /// asserting on its state.
    pub fn with_server<R>(&self, f: impl FnOnce(&mut MockServer) -> R) -> R {
        f(&mut self.server.lock().expect("mock server lock poisoned"))
    }

    fn record_call(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.failing.load(Ordering::Relaxed) {
            return Err(anyhow::anyhow!("mock network failure"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CommentsApi for MockApi {
    async fn list_comments(&self, event: EventId) -> anyhow::Result<Vec<Comment>> {
        self.record_call()?;
        Ok(self.with_server(|s| s.list_comments(event))?)
    }

    async fn create_comment(&self, comment: NewComment) -> anyhow::Result<Comment> {
        self.record_call()?;
        Ok(self.with_server(|s| s.create_comment(comment))?)
    }

    async fn react(
        &self,
        comment: CommentId,
        kind: ReactionKind,
    ) -> anyhow::Result<ReactionResponse> {
        self.record_call()?;
        Ok(self.with_server(|s| s.react(comment, kind))?)
    }
}
