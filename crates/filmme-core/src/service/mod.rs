//! Use cases - the operations the HTTP layer exposes, written against ports.

mod community;

pub use community::{CommunityService, LikeStatus, NewPost, PostChanges};
