//! Event handling coordination for interactive UI
//!
//! Polls crossterm for keyboard and resize events and feeds them to the
//! state manager.

use super::input_handler::translate_key;
use super::state_manager::{InteractiveState, Transition};
use crate::constants::polling;
use crate::data_fetcher::api::RemoteFeed;
use crate::error::AppError;
use crossterm::event::{self, Event};
use std::time::Duration;

/// Result of processing an event
#[derive(Debug, PartialEq)]
pub enum EventResult {
    /// Nothing happened
    Continue,
    /// Exit the application
    Exit,
    /// Event was handled, continue processing
    Handled,
}

/// Configuration for event handler
#[derive(Debug, Clone)]
pub struct EventHandlerConfig {
    /// Custom poll interval override (None for adaptive)
    pub poll_interval_override: Option<Duration>,
    /// Whether to enable resize event debouncing
    pub resize_debouncing: bool,
}

impl Default for EventHandlerConfig {
    fn default() -> Self {
        Self {
            poll_interval_override: None,
            resize_debouncing: true,
        }
    }
}

/// Main event handler for interactive UI
pub struct EventHandler {
    config: EventHandlerConfig,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            config: EventHandlerConfig::default(),
        }
    }

    pub fn with_config(config: EventHandlerConfig) -> Self {
        Self { config }
    }

    /// Process events for one iteration of the main loop
    pub fn process_events<F>(&self, state: &mut InteractiveState<F>) -> Result<EventResult, AppError>
    where
        F: RemoteFeed + Send + Sync + 'static,
    {
        let poll_interval = self.config.poll_interval_override.unwrap_or_else(|| {
            calculate_poll_interval(state.time_since_activity(), state.has_pending_fetches())
        });

        if !event::poll(poll_interval)? {
            return Ok(EventResult::Continue);
        }

        state.update_activity();
        match event::read()? {
            Event::Key(key_event) => {
                let Some(input) = translate_key(&key_event, state.focused_index()) else {
                    return Ok(EventResult::Continue);
                };
                match state.handle_input(input) {
                    Transition::Exit => Ok(EventResult::Exit),
                    Transition::Continue => Ok(EventResult::Handled),
                }
            }
            Event::Resize(width, height) => {
                self.handle_resize_event(state, width, height);
                Ok(EventResult::Handled)
            }
            _ => Ok(EventResult::Continue),
        }
    }

    /// Handle resize events with optional debouncing
    fn handle_resize_event<F>(&self, state: &mut InteractiveState<F>, width: u16, height: u16)
    where
        F: RemoteFeed + Send + Sync + 'static,
    {
        tracing::debug!("Resize event received: {}x{}", width, height);

        if self.config.resize_debouncing
            && state.timers.last_resize.elapsed() < Duration::from_millis(100)
        {
            // a burst of resizes ends in one more event; the final size is drawn then
            state.request_render();
            return;
        }
        state.handle_resize();
        state.timers.update_resize();
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Adaptive poll interval: snappy while the user is active or a fetch is running,
/// slower once idle.
pub(super) fn calculate_poll_interval(time_since_activity: Duration, fetch_pending: bool) -> Duration {
    if fetch_pending
        || time_since_activity < Duration::from_secs(polling::SEMI_ACTIVE_THRESHOLD_SECONDS)
    {
        Duration::from_millis(polling::ACTIVE_MS)
    } else if time_since_activity < Duration::from_secs(polling::IDLE_THRESHOLD_SECONDS) {
        Duration::from_millis(polling::SEMI_ACTIVE_MS)
    } else {
        Duration::from_millis(polling::IDLE_MS)
    }
}
