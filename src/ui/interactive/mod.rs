//! Interactive UI module
//!
//! - `state_manager`: catalog, navigation stack and fetch results in one controller
//! - `fetch_coordinator`: off-loop fetches with per-target deduplication
//! - `input_handler`: key to input event translation
//! - `event_handler`: polling, keyboard and resize events
//! - `terminal_manager`: raw mode and alternate screen
//! - `core`: main loop

mod core;
mod event_handler;
pub mod fetch_coordinator;
mod input_handler;
pub mod state_manager;
mod terminal_manager;

pub use core::run_interactive_ui;
pub use fetch_coordinator::{FetchCompletion, FetchCoordinator, FetchResult, FetchTarget, ScoreRequest};
pub use state_manager::{InteractiveState, Transition};
