//! State management for interactive UI
//!
//! `InteractiveState` owns the catalog, the navigation stack and the fetch coordinator,
//! and is the only place where input events and fetch results change them.

use super::fetch_coordinator::{FetchCompletion, FetchCoordinator, FetchResult, ScoreRequest};
use crate::catalog::MatchCatalog;
use crate::constants::labels;
use crate::data_fetcher::api::RemoteFeed;
use crate::data_fetcher::models::Match;
use crate::ui::menu::{build_loading_view, build_root_menu, build_score_view};
use crate::ui::navigation::{FrameKind, NavError, NavigationStack};
use crate::ui::view::{Action, InputEvent};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Timer state for the interactive loop
#[derive(Debug)]
pub struct TimerState {
    pub last_resize: Instant,
    pub last_activity: Instant,
}

impl TimerState {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_resize: now.checked_sub(Duration::from_millis(500)).unwrap_or(now),
            last_activity: now,
        }
    }

    /// Update activity timestamp
    pub fn update_activity(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Get time since last activity
    pub fn time_since_activity(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Update resize timestamp
    pub fn update_resize(&mut self) {
        self.last_resize = Instant::now();
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// UI rendering state
#[derive(Debug)]
pub struct UIState {
    pub needs_render: bool,
    /// Message for the status line; key hints are shown when empty.
    pub status: Option<String>,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            needs_render: true,
            status: None,
        }
    }

    /// Mark that a render is needed
    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    /// Clear render flag
    pub fn clear_render_flag(&mut self) {
        self.needs_render = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.needs_render = true;
    }

    pub fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.needs_render = true;
        }
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Exit,
}

/// Main interactive state coordinator
pub struct InteractiveState<F> {
    pub timers: TimerState,
    pub ui: UIState,
    catalog: MatchCatalog,
    stack: NavigationStack,
    coordinator: FetchCoordinator<F>,
    date: String,
}

impl<F> InteractiveState<F>
where
    F: RemoteFeed + Send + Sync + 'static,
{
    /// Starts at the root menu of an already refreshed catalog.
    pub fn new(catalog: MatchCatalog, feed: Arc<F>, date: String, max_depth: usize) -> Self {
        Self::with_coordinator(catalog, FetchCoordinator::new(feed), date, max_depth)
    }

    pub fn with_coordinator(
        catalog: MatchCatalog,
        coordinator: FetchCoordinator<F>,
        date: String,
        max_depth: usize,
    ) -> Self {
        let stack = NavigationStack::new(build_root_menu(&catalog), max_depth);
        Self {
            timers: TimerState::new(),
            ui: UIState::new(),
            catalog,
            stack,
            coordinator,
            date,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Transition {
        debug!("Input event: {:?}", event);
        match event {
            InputEvent::Activate(index) => {
                let Some(action) = self.stack.top().action_at(index).cloned() else {
                    debug!("No button at index {index}");
                    return Transition::Continue;
                };
                self.stack.top_mut().focus(index);
                self.dispatch(action)
            }
            InputEvent::Back => {
                self.back();
                Transition::Continue
            }
            InputEvent::Refresh => {
                self.refresh();
                Transition::Continue
            }
            InputEvent::Exit => Transition::Exit,
            InputEvent::Other(raw) => {
                if self.stack.forward_input(raw) {
                    self.ui.request_render();
                }
                Transition::Continue
            }
        }
    }

    fn dispatch(&mut self, action: Action) -> Transition {
        match action {
            Action::OpenSubmenu { title, view } => {
                match self.stack.push(FrameKind::Submenu(title), *view) {
                    Ok(_) => self.ui.clear_status(),
                    Err(e) => self.report_nav_error(e),
                }
                self.ui.request_render();
            }
            Action::ShowScore(game) => self.open_score(game),
            Action::Back => self.back(),
            Action::Refresh => self.refresh(),
            Action::Exit => return Transition::Exit,
        }
        Transition::Continue
    }

    fn open_score(&mut self, game: Match) {
        let kind = FrameKind::Score(game.match_id.clone());
        match self.stack.push(kind, build_loading_view(&game)) {
            Ok(frame) => {
                self.ui.clear_status();
                if self.coordinator.request_score(&game, frame) == ScoreRequest::Joined {
                    debug!("Frame {:?} waits on running fetch for {}", frame, game.match_id);
                }
            }
            Err(e) => self.report_nav_error(e),
        }
        self.ui.request_render();
    }

    fn back(&mut self) {
        match self.stack.pop() {
            Ok(frame) => {
                debug!("Popped {:?}", frame.id());
                self.ui.request_render();
            }
            Err(NavError::AtRoot) => {}
            Err(e) => self.report_nav_error(e),
        }
    }

    /// Collapses to the root right away and starts a catalog fetch; the root menu is
    /// rebuilt again when the fetch lands.
    fn refresh(&mut self) {
        self.stack.reset_to_root(build_root_menu(&self.catalog));
        if self.coordinator.request_catalog(&self.date) {
            info!("Catalog refresh started for {}", self.date);
            self.ui.set_status(labels::REFRESHING);
        }
        self.ui.request_render();
    }

    fn report_nav_error(&mut self, error: NavError) {
        match error {
            NavError::Overflow { max } => {
                warn!("Navigation depth limit {max} reached");
                self.ui.set_status(labels::TOO_DEEP);
            }
            NavError::AtRoot => {}
        }
    }

    /// Applies a finished fetch. Score results only land in frames that are still open.
    pub fn apply_fetch(&mut self, completion: FetchCompletion) {
        match completion.result {
            FetchResult::Catalog { date, result } => match result {
                Ok(matches) => {
                    self.catalog.replace(date, matches);
                    let root = build_root_menu(&self.catalog);
                    if self.stack.depth() == 1 {
                        self.stack.reset_to_root(root);
                    } else {
                        self.stack.replace_root(root);
                    }
                    self.ui.clear_status();
                }
                Err(e) => {
                    warn!("Catalog refresh failed, keeping previous catalog: {e}");
                    self.ui.set_status(format!("{}: {e}", labels::FETCH_FAILED));
                }
            },
            FetchResult::Score { game, result } => {
                if let Err(e) = &result {
                    warn!("Score fetch for {} failed: {e}", game.match_id);
                }
                for frame in completion.waiters {
                    if self.stack.replace_view(frame, build_score_view(&game, &result)) {
                        debug!("Score for {} applied to {:?}", game.match_id, frame);
                    } else {
                        debug!(
                            "Discarding score for {}: {:?} is no longer open",
                            game.match_id, frame
                        );
                    }
                }
            }
        }
        self.ui.request_render();
    }

    /// Applies every fetch that has finished so far. Returns how many were applied.
    pub fn pump_fetches(&mut self) -> usize {
        let mut applied = 0;
        while let Some(completion) = self.coordinator.try_next() {
            self.apply_fetch(completion);
            applied += 1;
        }
        applied
    }

    /// Waits until nothing is in flight, applying results as they arrive.
    pub async fn wait_for_fetches(&mut self) {
        while let Some(completion) = self.coordinator.next().await {
            self.apply_fetch(completion);
        }
    }

    pub fn has_pending_fetches(&self) -> bool {
        self.coordinator.has_pending()
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn catalog(&self) -> &MatchCatalog {
        &self.catalog
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn status(&self) -> Option<&str> {
        self.ui.status.as_deref()
    }

    /// Index of the focused button in the top frame.
    pub fn focused_index(&self) -> usize {
        self.stack.top().cursor()
    }

    pub fn update_activity(&mut self) {
        self.timers.update_activity();
    }

    pub fn time_since_activity(&self) -> Duration {
        self.timers.time_since_activity()
    }

    pub fn needs_render(&self) -> bool {
        self.ui.needs_render
    }

    pub fn request_render(&mut self) {
        self.ui.request_render();
    }

    pub fn clear_render_flag(&mut self) {
        self.ui.clear_render_flag();
    }

    pub fn handle_resize(&mut self) {
        self.ui.request_render();
    }
}
