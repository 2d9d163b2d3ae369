//! The remote feed seam: the two calls the dashboard makes against the results service.

use reqwest::Client;
use std::future::Future;
use tracing::{info, instrument};

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_schedule_url, build_score_url};
use crate::config::Config;
use crate::data_fetcher::models::{ScheduleResponse, ScorePayload};
use crate::error::AppError;

/// Source of schedule and score data.
///
/// Implementations resolve to either a decoded document or an [`AppError`]; they never
/// panic and never evaluate anything found in the payload.
pub trait RemoteFeed {
    /// Fetches the schedule for one `YYYY-MM-DD` day.
    fn fetch_day_schedule(
        &self,
        date: &str,
    ) -> impl Future<Output = Result<ScheduleResponse, AppError>> + Send;

    /// Fetches the stat-detail document for one match.
    fn fetch_match_score(
        &self,
        match_id: &str,
    ) -> impl Future<Output = Result<ScorePayload, AppError>> + Send;
}

/// [`RemoteFeed`] backed by the HTTP results service.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: Client,
    api_domain: String,
    column_id: u32,
}

impl HttpFeed {
    pub fn new(client: Client, api_domain: impl Into<String>, column_id: u32) -> Self {
        Self {
            client,
            api_domain: api_domain.into(),
            column_id,
        }
    }

    /// Builds a feed with its own client, using the configured domain and timeout.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.api_domain.clone(), config.column_id))
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }
}

impl RemoteFeed for HttpFeed {
    #[instrument(skip(self))]
    async fn fetch_day_schedule(&self, date: &str) -> Result<ScheduleResponse, AppError> {
        let url = build_schedule_url(&self.api_domain, self.column_id, date)?;
        let response: ScheduleResponse = fetch(&self.client, &url).await?;
        info!(
            "Schedule response for {} covers {} day(s)",
            date,
            response.data.matches.len()
        );
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn fetch_match_score(&self, match_id: &str) -> Result<ScorePayload, AppError> {
        let url = build_score_url(&self.api_domain, match_id)?;
        fetch(&self.client, &url).await
    }
}
