use crate::data_fetcher::api::RemoteFeed;
use crate::data_fetcher::models::{LivePeriod, Match, ScheduleResponse, ScorePayload};
use crate::error::AppError;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a match with a name derived from its id
    pub fn create_match(match_id: &str, live_period: LivePeriod) -> Match {
        Match {
            name: match_id.to_string(),
            start_time: "2021-07-29 19:30:00".to_string(),
            is_home_team: false,
            is_gold_medal: false,
            match_id: match_id.to_string(),
            round_label: String::new(),
            live_period,
        }
    }

    /// Creates a gold medal event
    pub fn create_gold_match(match_id: &str, live_period: LivePeriod) -> Match {
        Match {
            is_gold_medal: true,
            ..Self::create_match(match_id, live_period)
        }
    }

    /// Creates an event with home team participation
    pub fn create_home_match(match_id: &str, live_period: LivePeriod) -> Match {
        Match {
            is_home_team: true,
            ..Self::create_match(match_id, live_period)
        }
    }

    /// Raw schedule list entry the way the feed sends it: flags as strings, period as a
    /// number.
    pub fn schedule_entry(
        mid: &str,
        name: &str,
        live_period: i64,
        is_gold: &str,
        is_china: &str,
    ) -> Value {
        json!({
            "categoryId": "5",
            "matchInfo": {
                "mid": mid,
                "matchDesc": name,
                "startTime": "2021-07-29 19:30:00",
                "quarter": "决赛",
                "livePeriod": live_period,
                "isGold": is_gold,
                "isChina": is_china,
            }
        })
    }

    /// Wraps list entries into a schedule response for `date`.
    pub fn schedule_response(date: &str, entries: Vec<Value>) -> ScheduleResponse {
        let mut days = serde_json::Map::new();
        days.insert(date.to_string(), json!({ "list": entries }));
        serde_json::from_value(json!({ "data": { "matches": days } }))
            .expect("valid schedule response")
    }

    /// Score rows as `{html}` cell objects.
    pub fn raw_score_rows(rows: &[&[&str]]) -> Vec<Value> {
        rows.iter()
            .map(|row| {
                Value::Array(
                    row.iter()
                        .map(|cell| json!({ "html": cell }))
                        .collect(),
                )
            })
            .collect()
    }

    /// Full stat-detail payload carrying `rows`.
    pub fn score_payload(rows: &[&[&str]]) -> ScorePayload {
        ScorePayload(json!({
            "data": { "stats": [ { "rows": Self::raw_score_rows(rows) } ] }
        }))
    }
}

enum Canned<T> {
    Ok(T),
    Err(String),
}

/// In-memory [`RemoteFeed`] with canned responses and call counters.
///
/// Unknown dates and match ids answer with `ApiNotFound`; failures are reported as
/// `ApiNoData` carrying the configured message.
#[derive(Default)]
pub struct FakeFeed {
    schedules: Mutex<HashMap<String, Canned<ScheduleResponse>>>,
    scores: Mutex<HashMap<String, Canned<ScorePayload>>>,
    schedule_calls: AtomicUsize,
    score_calls: Mutex<HashMap<String, usize>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_schedule(&self, date: &str, response: ScheduleResponse) {
        lock(&self.schedules).insert(date.to_string(), Canned::Ok(response));
    }

    pub fn fail_schedule(&self, date: &str, message: &str) {
        lock(&self.schedules).insert(date.to_string(), Canned::Err(message.to_string()));
    }

    pub fn set_score(&self, match_id: &str, payload: ScorePayload) {
        lock(&self.scores).insert(match_id.to_string(), Canned::Ok(payload));
    }

    pub fn fail_score(&self, match_id: &str, message: &str) {
        lock(&self.scores).insert(match_id.to_string(), Canned::Err(message.to_string()));
    }

    /// Makes every call sleep before answering, so tests can observe in-flight work.
    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.delay) = Some(delay);
    }

    pub fn schedule_calls(&self) -> usize {
        self.schedule_calls.load(Ordering::SeqCst)
    }

    pub fn score_calls(&self, match_id: &str) -> usize {
        lock(&self.score_calls).get(match_id).copied().unwrap_or(0)
    }

    fn current_delay(&self) -> Option<Duration> {
        *lock(&self.delay)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RemoteFeed for FakeFeed {
    async fn fetch_day_schedule(&self, date: &str) -> Result<ScheduleResponse, AppError> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.current_delay() {
            tokio::time::sleep(delay).await;
        }
        let url = format!("fake://schedule/{date}");
        match lock(&self.schedules).get(date) {
            Some(Canned::Ok(response)) => Ok(response.clone()),
            Some(Canned::Err(message)) => Err(AppError::api_no_data(message.clone(), url)),
            None => Err(AppError::api_not_found(url)),
        }
    }

    async fn fetch_match_score(&self, match_id: &str) -> Result<ScorePayload, AppError> {
        *lock(&self.score_calls)
            .entry(match_id.to_string())
            .or_insert(0) += 1;
        if let Some(delay) = self.current_delay() {
            tokio::time::sleep(delay).await;
        }
        let url = format!("fake://score/{match_id}");
        match lock(&self.scores).get(match_id) {
            Some(Canned::Ok(payload)) => Ok(payload.clone()),
            Some(Canned::Err(message)) => Err(AppError::api_no_data(message.clone(), url)),
            None => Err(AppError::api_not_found(url)),
        }
    }
}
