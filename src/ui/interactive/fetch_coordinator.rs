//! Runs remote fetches off the event loop.
//!
//! Each target (the catalog, or one match's score) has at most one fetch in flight. A
//! second catalog request while one is running is rejected; a second score request for
//! the same match joins the running fetch as an extra waiter. Fetches run as tasks in a
//! `JoinSet`; the event loop collects them and decides whether the waiting frames still
//! exist. A task that panics completes its target with an error.

use crate::catalog::fetch_catalog;
use crate::constants::FETCH_TIMEOUT_SECONDS;
use crate::data_fetcher::api::RemoteFeed;
use crate::data_fetcher::models::{Match, ScoreOutcome};
use crate::data_fetcher::processors::ScoreTableBuilder;
use crate::error::AppError;
use crate::ui::navigation::FrameId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchTarget {
    Catalog,
    Score(String),
}

#[derive(Debug)]
pub enum FetchResult {
    Catalog {
        date: String,
        result: Result<Vec<Match>, AppError>,
    },
    Score {
        game: Match,
        result: Result<ScoreOutcome, AppError>,
    },
}

/// A finished fetch together with the frames that were waiting for it.
#[derive(Debug)]
pub struct FetchCompletion {
    pub target: FetchTarget,
    pub waiters: Vec<FrameId>,
    pub result: FetchResult,
}

/// Outcome of asking for a score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRequest {
    Started,
    /// A fetch for the same match was already running; the frame now waits on it too.
    Joined,
}

/// What a running task was fetching, kept so a panicked task can still be reported.
#[derive(Debug)]
enum TaskContext {
    Catalog { date: String },
    Score { game: Match },
}

impl TaskContext {
    fn into_failure(self, error: &JoinError) -> (FetchTarget, FetchResult) {
        let message = error.to_string();
        match self {
            TaskContext::Catalog { date } => (
                FetchTarget::Catalog,
                FetchResult::Catalog {
                    date,
                    result: Err(AppError::fetch_task_failed(message)),
                },
            ),
            TaskContext::Score { game } => (
                FetchTarget::Score(game.match_id.clone()),
                FetchResult::Score {
                    game,
                    result: Err(AppError::fetch_task_failed(message)),
                },
            ),
        }
    }
}

pub struct FetchCoordinator<F> {
    feed: Arc<F>,
    scores: ScoreTableBuilder<F>,
    in_flight: HashMap<FetchTarget, Vec<FrameId>>,
    tasks: JoinSet<(FetchTarget, FetchResult)>,
    contexts: HashMap<Id, TaskContext>,
    timeout: Duration,
}

impl<F> FetchCoordinator<F>
where
    F: RemoteFeed + Send + Sync + 'static,
{
    pub fn new(feed: Arc<F>) -> Self {
        let scores = ScoreTableBuilder::new(Arc::clone(&feed));
        Self::with_builder(feed, scores)
    }

    pub fn with_builder(feed: Arc<F>, scores: ScoreTableBuilder<F>) -> Self {
        Self {
            feed,
            scores,
            in_flight: HashMap::new(),
            tasks: JoinSet::new(),
            contexts: HashMap::new(),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECONDS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Starts a catalog fetch for `date`. Returns `false` if one is already running.
    pub fn request_catalog(&mut self, date: &str) -> bool {
        if self.in_flight.contains_key(&FetchTarget::Catalog) {
            info!("Catalog refresh already in flight, ignoring request for {date}");
            return false;
        }
        self.in_flight.insert(FetchTarget::Catalog, Vec::new());

        let feed = Arc::clone(&self.feed);
        let date = date.to_string();
        let label = format!("catalog:{date}");
        let timeout = self.timeout;
        let context = TaskContext::Catalog { date: date.clone() };
        let handle = self.tasks.spawn(async move {
            let result = with_timeout(timeout, &label, fetch_catalog(feed.as_ref(), &date)).await;
            (FetchTarget::Catalog, FetchResult::Catalog { date, result })
        });
        self.contexts.insert(handle.id(), context);
        true
    }

    /// Fetches the score table of `game` on behalf of `frame`.
    pub fn request_score(&mut self, game: &Match, frame: FrameId) -> ScoreRequest {
        let target = FetchTarget::Score(game.match_id.clone());
        if let Some(waiters) = self.in_flight.get_mut(&target) {
            debug!(
                "Score fetch for {} already in flight, {:?} joins",
                game.match_id, frame
            );
            waiters.push(frame);
            return ScoreRequest::Joined;
        }
        self.in_flight.insert(target.clone(), vec![frame]);

        let scores = self.scores.clone();
        let game = game.clone();
        let label = format!("score:{}", game.match_id);
        let timeout = self.timeout;
        let context = TaskContext::Score { game: game.clone() };
        let handle = self.tasks.spawn(async move {
            let result = with_timeout(timeout, &label, scores.build(&game)).await;
            (target, FetchResult::Score { game, result })
        });
        self.contexts.insert(handle.id(), context);
        ScoreRequest::Started
    }

    /// Returns a finished fetch without waiting, if there is one.
    pub fn try_next(&mut self) -> Option<FetchCompletion> {
        loop {
            let joined = self.tasks.try_join_next_with_id()?;
            if let Some(completion) = self.finish(joined) {
                return Some(completion);
            }
        }
    }

    /// Waits for the next fetch to finish. Returns `None` when nothing is in flight.
    pub async fn next(&mut self) -> Option<FetchCompletion> {
        if self.in_flight.is_empty() {
            return None;
        }
        loop {
            let joined = self.tasks.join_next_with_id().await?;
            if let Some(completion) = self.finish(joined) {
                return Some(completion);
            }
        }
    }

    fn finish(
        &mut self,
        joined: Result<(Id, (FetchTarget, FetchResult)), JoinError>,
    ) -> Option<FetchCompletion> {
        match joined {
            Ok((id, (target, result))) => {
                self.contexts.remove(&id);
                Some(self.complete(target, result))
            }
            Err(error) => {
                let context = self.contexts.remove(&error.id())?;
                warn!("Fetch task for {:?} ended abnormally: {}", context, error);
                let (target, result) = context.into_failure(&error);
                Some(self.complete(target, result))
            }
        }
    }

    fn complete(&mut self, target: FetchTarget, result: FetchResult) -> FetchCompletion {
        let waiters = self.in_flight.remove(&target).unwrap_or_default();
        FetchCompletion {
            target,
            waiters,
            result,
        }
    }

    pub fn is_in_flight(&self, target: &FetchTarget) -> bool {
        self.in_flight.contains_key(target)
    }

    pub fn has_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }
}

async fn with_timeout<T>(
    timeout: Duration,
    label: &str,
    fut: impl Future<Output = Result<T, AppError>>,
) -> Result<T, AppError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Fetch {} timed out after {:?}", label, timeout);
            Err(AppError::network_timeout(label))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::{LivePeriod, ScheduleResponse, ScorePayload};
    use crate::testing_utils::{FakeFeed, TestDataBuilder};
    use crate::ui::navigation::NavigationStack;
    use crate::ui::view::ViewNode;

    const DATE: &str = "2021-07-29";

    fn frame_ids(count: usize) -> Vec<FrameId> {
        let mut stack = NavigationStack::new(ViewNode::text("root"), count + 1);
        (0..count)
            .map(|_| {
                stack
                    .push(
                        crate::ui::navigation::FrameKind::Score("A".into()),
                        ViewNode::text("x"),
                    )
                    .unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_second_catalog_request_is_rejected() {
        let feed = Arc::new(FakeFeed::new());
        feed.set_schedule(DATE, TestDataBuilder::schedule_response(DATE, vec![]));
        let mut coordinator = FetchCoordinator::new(Arc::clone(&feed));

        assert!(coordinator.request_catalog(DATE));
        assert!(!coordinator.request_catalog(DATE));

        let done = coordinator.next().await.unwrap();
        assert_eq!(done.target, FetchTarget::Catalog);
        assert!(matches!(
            done.result,
            FetchResult::Catalog { result: Ok(ref matches), .. } if matches.is_empty()
        ));
        assert_eq!(feed.schedule_calls(), 1);
        assert!(!coordinator.has_pending());
        assert!(coordinator.request_catalog(DATE));
    }

    #[tokio::test]
    async fn test_duplicate_score_requests_are_coalesced() {
        let feed = Arc::new(FakeFeed::new());
        feed.set_score("A", TestDataBuilder::score_payload(&[&["H", "X"], &["r", "1"]]));
        let mut coordinator = FetchCoordinator::new(Arc::clone(&feed));
        let game = TestDataBuilder::create_match("A", LivePeriod::InProgress);
        let ids = frame_ids(2);

        assert_eq!(coordinator.request_score(&game, ids[0]), ScoreRequest::Started);
        assert_eq!(coordinator.request_score(&game, ids[1]), ScoreRequest::Joined);

        let done = coordinator.next().await.unwrap();
        assert_eq!(done.waiters, ids);
        assert!(matches!(
            done.result,
            FetchResult::Score { result: Ok(ScoreOutcome::Table(_)), .. }
        ));
        assert_eq!(feed.score_calls("A"), 1);
        assert!(coordinator.next().await.is_none());
    }

    #[tokio::test]
    async fn test_slow_fetch_times_out() {
        let feed = Arc::new(FakeFeed::new());
        feed.set_delay(Duration::from_millis(200));
        feed.set_schedule(DATE, TestDataBuilder::schedule_response(DATE, vec![]));
        let mut coordinator =
            FetchCoordinator::new(Arc::clone(&feed)).with_timeout(Duration::from_millis(10));

        coordinator.request_catalog(DATE);
        let done = coordinator.next().await.unwrap();
        assert!(matches!(
            done.result,
            FetchResult::Catalog { result: Err(AppError::NetworkTimeout { .. }), .. }
        ));
    }

    struct PanickingFeed;

    impl RemoteFeed for PanickingFeed {
        async fn fetch_day_schedule(&self, _date: &str) -> Result<ScheduleResponse, AppError> {
            panic!("schedule decoder blew up")
        }

        async fn fetch_match_score(&self, _match_id: &str) -> Result<ScorePayload, AppError> {
            panic!("score decoder blew up")
        }
    }

    #[tokio::test]
    async fn test_panicked_fetch_releases_its_target() {
        let mut coordinator = FetchCoordinator::new(Arc::new(PanickingFeed));
        let game = TestDataBuilder::create_match("A", LivePeriod::InProgress);
        let ids = frame_ids(1);

        assert!(coordinator.request_catalog(DATE));
        coordinator.request_score(&game, ids[0]);

        let mut completions = Vec::new();
        while let Some(done) = coordinator.next().await {
            completions.push(done);
        }

        assert_eq!(completions.len(), 2);
        for done in &completions {
            match &done.result {
                FetchResult::Catalog { result, .. } => {
                    assert!(matches!(result, Err(AppError::FetchTask(_))));
                }
                FetchResult::Score { result, .. } => {
                    assert!(matches!(result, Err(AppError::FetchTask(_))));
                    assert_eq!(done.waiters, ids);
                }
            }
        }
        assert!(!coordinator.has_pending());
        assert!(coordinator.request_catalog(DATE));
    }

    #[tokio::test]
    async fn test_try_next_is_empty_without_work() {
        let feed = Arc::new(FakeFeed::new());
        let mut coordinator = FetchCoordinator::new(feed);
        assert!(coordinator.try_next().is_none());
        assert!(!coordinator.is_in_flight(&FetchTarget::Catalog));
    }
}
