mod category;
mod post;
mod user;

pub use category::{Category, DEFAULT_ICON};
pub use post::Post;
pub use user::User;
