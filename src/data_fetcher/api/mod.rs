pub mod feed;
mod fetch_utils;
pub mod http_client;
pub mod urls;

pub use feed::{HttpFeed, RemoteFeed};
#[allow(unused_imports)]
pub use http_client::*;
pub use urls::*;
