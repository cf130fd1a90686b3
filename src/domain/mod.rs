pub mod hashtag;
pub mod health;
