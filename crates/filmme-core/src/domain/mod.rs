//! Domain entities - the core business objects.

mod category;
mod comment;
mod like;
mod listing;
mod page;
mod post;
mod user;

pub use category::{Category, UnknownCategory};
pub use comment::Comment;
pub use like::Like;
pub use listing::{PostOrdering, PostQuery};
pub use page::{Page, PageRequest, PaginationPolicy};
pub use post::{Post, PostDetails, PostWithLikes};
pub use user::User;
