use crate::cli::Args;
use olympic_teletext::catalog::MatchCatalog;
use olympic_teletext::config::Config;
use olympic_teletext::data_fetcher::HttpFeed;
use olympic_teletext::error::AppError;
use olympic_teletext::ui::{self, InteractiveState};
use std::sync::Arc;

/// Run the interactive application flow.
///
/// - Fetches the day's catalog; a failure here ends the program with an error
/// - Builds the interactive state around the catalog and the feed
/// - Runs the dashboard until the user exits
pub async fn run_interactive(args: &Args, config: &Config, date: String) -> Result<(), AppError> {
    let feed = Arc::new(HttpFeed::from_config(config)?);

    let mut catalog = MatchCatalog::new();
    if let Err(e) = catalog.refresh(feed.as_ref(), &date).await {
        if e.is_fetch_error() {
            tracing::error!("Could not load the schedule for {date} from {}: {e}", feed.api_domain());
        }
        return Err(e);
    }
    tracing::info!("Starting dashboard with {} matches for {date}", catalog.len());

    let state = InteractiveState::new(catalog, feed, date, config.max_nav_depth);
    ui::run_interactive_ui(state, args.debug).await
}
