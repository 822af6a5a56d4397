use async_trait::async_trait;

use crate::{
    api::{Comment, CommentId, EventId, NewComment, ReactionKind, ReactionResponse},
    forest, order, reaction, SortMode,
};

/// Network boundary of the comment section: the backend's comment
/// endpoints for one society event. Implemented by [`crate::RestApi`]
/// for production and by the mock server for tests.
#[async_trait]
pub trait CommentsApi {
    async fn list_comments(&self, event: EventId) -> anyhow::Result<Vec<Comment>>;
    async fn create_comment(&self, comment: NewComment) -> anyhow::Result<Comment>;
    async fn react(
        &self,
        comment: CommentId,
        kind: ReactionKind,
    ) -> anyhow::Result<ReactionResponse>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadState {
    /// Initial fetch still in flight.
    Loading,
    /// Forest populated (possibly empty); user actions are accepted.
    Loaded,
}

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Owns the comment state for one event-detail view, from initial fetch
/// to teardown. One instance per mounted view; no cross-view sharing or
/// caching, and dropping the section drops the forest with it.
///
/// Every mutation is commit-on-success: the request goes out first, the
/// forest is only touched once the server has answered, and a failure is
/// logged through `tracing` and leaves the pre-action state in place.
/// Nothing here is debounced or cancelled; concurrent calls each send
/// their own request and the last processed response wins.
pub struct CommentSection<A> {
    api: A,
    event: EventId,
    state: LoadState,
    comments: Vec<Comment>,
    sort: SortMode,
    page_size: usize,
    page: usize, // 1-indexed
}

impl<A: CommentsApi> CommentSection<A> {
    pub fn new(api: A, event: EventId) -> CommentSection<A> {
        CommentSection {
            api,
            event,
            state: LoadState::Loading,
            comments: Vec::new(),
            sort: SortMode::Time,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn event(&self) -> EventId {
        self.event
    }

    /// The full forest, in the order the server returned it.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetches the full forest for the event, replacing whatever was
    /// there. A failed fetch lands in Loaded with an empty forest: the
    /// view shows its usual no-comments affordance and no retry is
    /// scheduled. TODO: surface fetch failures to the view once the
    /// design grows an error affordance.
    pub async fn load(&mut self) {
        match self.api.list_comments(self.event).await {
            Ok(comments) => {
                tracing::debug!(
                    event = ?self.event,
                    num = forest::count(&comments),
                    "fetched comment forest"
                );
                self.comments = comments;
            }
            Err(e) => {
                tracing::error!(event = ?self.event, "failed to fetch comments: {e:?}");
                self.comments = Vec::new();
            }
        }
        self.state = LoadState::Loaded;
    }

    /// Submits a new top-level comment. Returns true when the server
    /// accepted it, which is the caller's cue to clear the input field;
    /// blank content is skipped before any request is made.
    pub async fn submit_comment(&mut self, content: &str) -> bool {
        self.submit(content, None).await
    }

    /// Same contract as [`Self::submit_comment`], for a reply under
    /// `parent` (which may itself be a reply).
    pub async fn submit_reply(&mut self, parent: CommentId, content: &str) -> bool {
        self.submit(content, Some(parent)).await
    }

    async fn submit(&mut self, content: &str, parent: Option<CommentId>) -> bool {
        let new = NewComment {
            event: self.event,
            content: content.to_string(),
            parent_comment: parent,
        };
        if new.validate().is_err() {
            // never send blank content over the wire
            return false;
        }
        match self.api.create_comment(new).await {
            Ok(c) => {
                match parent {
                    None => self.comments.push(c),
                    Some(parent) => {
                        if !forest::insert_reply(&mut self.comments, parent, c) {
                            tracing::warn!(
                                ?parent,
                                "server accepted a reply whose parent is not in the forest"
                            );
                        }
                    }
                }
                true
            }
            Err(e) => {
                tracing::error!(event = ?self.event, ?parent, "failed to submit comment: {e:?}");
                false
            }
        }
    }

    /// Sends the toggle request for `kind`, then applies the server's
    /// answer to the one targeted comment; the rest of the forest is
    /// untouched. A failure changes nothing, so the pre-click counters
    /// stay on screen.
    pub async fn react(&mut self, comment: CommentId, kind: ReactionKind) {
        match self.api.react(comment, kind).await {
            Ok(ReactionResponse { status }) => {
                match forest::find_in_mut(&mut self.comments, comment) {
                    Some(c) => reaction::apply_reaction(c, kind, status),
                    None => {
                        tracing::warn!(?comment, "got reaction ack for a comment not in the forest")
                    }
                }
            }
            Err(e) => tracing::error!(?comment, "failed to toggle reaction: {e:?}"),
        }
    }

    /// Changing the sort mode starts back from the first page.
    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.page = 1;
    }

    /// Changing the page size starts back from the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// The slice of top-level comments the view should currently render,
    /// replies still nested under each. Pure over the owned forest, so
    /// safe to call on every render.
    pub fn visible(&self) -> Vec<Comment> {
        order::rank(&self.comments, self.sort, self.page_size, self.page)
    }

    pub fn page_count(&self) -> usize {
        order::page_count(self.comments.len(), self.page_size)
    }
}
