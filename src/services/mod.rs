/// Business logic layer
///
/// Services validate drafts, enforce mutation guards, and assemble page
/// contexts. Handlers stay thin request/response adapters.
pub mod comments;
pub mod follows;
pub mod posts;

pub use comments::CommentService;
pub use follows::FollowService;
pub use posts::{DeleteOutcome, EditOutcome, PostService};
