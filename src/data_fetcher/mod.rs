pub mod api;
pub mod cache;
pub mod models;
pub mod processors;

pub use api::{HttpFeed, RemoteFeed};
pub use models::{Match, ScoreOutcome, ScoreTable};
