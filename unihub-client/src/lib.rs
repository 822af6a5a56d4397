pub mod forest;

mod order;
pub use order::{page_count, rank, SortMode};

mod reaction;
pub use reaction::apply_reaction;

mod rest;
pub use rest::RestApi;

mod section;
pub use section::{CommentSection, CommentsApi, LoadState, DEFAULT_PAGE_SIZE};

pub mod api {
    pub use unihub_api::*;
}
