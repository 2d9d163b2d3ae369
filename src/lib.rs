//! Olympic Results Teletext Dashboard Library
//!
//! Fetches a day's Olympic schedule, sorts it into categories (in progress, gold medal
//! finals, home team, upcoming) and lets the user drill into live score tables through a
//! stack of overlay menus.
//!
//! # Examples
//!
//! ```rust,no_run
//! use olympic_teletext::catalog::{MatchCatalog, MatchFilter};
//! use olympic_teletext::config::Config;
//! use olympic_teletext::data_fetcher::HttpFeed;
//! use olympic_teletext::error::AppError;
//! use olympic_teletext::ui::{NavigationStack, build_root_menu};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let feed = HttpFeed::from_config(&config)?;
//!
//!     let mut catalog = MatchCatalog::new();
//!     catalog.refresh(&feed, "2021-07-29").await?;
//!
//!     for game in catalog.filter(MatchFilter::Gold).refine(MatchFilter::Live) {
//!         println!("{}", game.name);
//!     }
//!
//!     let stack = NavigationStack::new(build_root_menu(&catalog), config.max_nav_depth);
//!     println!("depth {}", stack.depth());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod testing_utils;
pub mod ui;

// Re-export commonly used types for convenience
pub use catalog::{MatchCatalog, MatchFilter};
pub use config::Config;
pub use data_fetcher::{HttpFeed, Match, RemoteFeed, ScoreOutcome, ScoreTable};
pub use error::AppError;
pub use ui::{NavigationStack, ViewNode};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
