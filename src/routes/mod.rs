pub mod category;
pub mod feed;
pub mod health;
pub mod media;
pub mod post;
pub mod user;
