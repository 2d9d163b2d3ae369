//! The day's matches and the category views the menus are built from.

use crate::data_fetcher::api::RemoteFeed;
use crate::data_fetcher::models::{LivePeriod, Match};
use crate::data_fetcher::processors::process_schedule;
use crate::error::AppError;
use std::fmt;
use std::slice;
use tracing::{info, instrument};

/// Category predicates over a [`Match`]. Categories overlap: a live gold-medal final
/// with the home team in it shows up under LIVE, GOLD and HOME_TEAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchFilter {
    Live,
    Upcoming,
    Finished,
    Gold,
    HomeTeam,
    HasScore,
}

impl MatchFilter {
    pub fn matches(self, game: &Match) -> bool {
        match self {
            MatchFilter::Live => game.is_live(),
            MatchFilter::Upcoming => game.live_period == LivePeriod::NotStarted,
            MatchFilter::Finished => game.is_finished(),
            MatchFilter::Gold => game.is_gold_medal,
            MatchFilter::HomeTeam => game.is_home_team,
            MatchFilter::HasScore => game.has_score(),
        }
    }
}

impl fmt::Display for MatchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchFilter::Live => "LIVE",
            MatchFilter::Upcoming => "UPCOMING",
            MatchFilter::Finished => "FINISHED",
            MatchFilter::Gold => "GOLD",
            MatchFilter::HomeTeam => "HOME_TEAM",
            MatchFilter::HasScore => "HAS_SCORE",
        };
        f.write_str(name)
    }
}

/// Lazy view of the matches passing one or more filters, in feed order.
///
/// Cloning restarts the view from wherever the clone was taken. Views borrow the
/// catalog, so none can outlive a refresh.
#[derive(Clone)]
pub struct FilteredMatches<'a, I> {
    inner: I,
    filters: Vec<MatchFilter>,
    _catalog: std::marker::PhantomData<&'a Match>,
}

impl<'a, I> FilteredMatches<'a, I>
where
    I: Iterator<Item = &'a Match>,
{
    fn new(inner: I, filter: MatchFilter) -> Self {
        Self {
            inner,
            filters: vec![filter],
            _catalog: std::marker::PhantomData,
        }
    }

    /// Narrows the view further; a match must pass every filter applied so far.
    pub fn refine(mut self, filter: MatchFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(&self) -> &[MatchFilter] {
        &self.filters
    }
}

impl<'a, I> Iterator for FilteredMatches<'a, I>
where
    I: Iterator<Item = &'a Match>,
{
    type Item = &'a Match;

    fn next(&mut self) -> Option<Self::Item> {
        let filters = &self.filters;
        self.inner
            .by_ref()
            .find(|game| filters.iter().all(|filter| filter.matches(game)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Filtering for any sequence of borrowed matches.
pub trait MatchIterExt<'a>: Iterator<Item = &'a Match> + Sized {
    fn filter_by(self, filter: MatchFilter) -> FilteredMatches<'a, Self> {
        FilteredMatches::new(self, filter)
    }
}

impl<'a, I: Iterator<Item = &'a Match>> MatchIterExt<'a> for I {}

/// All matches known for the current day.
///
/// Contents only ever change wholesale: a refresh either swaps in the complete new list
/// or leaves everything as it was.
#[derive(Debug, Clone, Default)]
pub struct MatchCatalog {
    matches: Vec<Match>,
    date: Option<String>,
    generation: u64,
}

impl MatchCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches `date` and replaces the contents. On error the catalog is untouched.
    #[instrument(skip(self, feed))]
    pub async fn refresh<F: RemoteFeed>(&mut self, feed: &F, date: &str) -> Result<(), AppError> {
        let matches = fetch_catalog(feed, date).await?;
        self.replace(date.to_string(), matches);
        Ok(())
    }

    /// Swaps in a complete match list.
    pub fn replace(&mut self, date: String, matches: Vec<Match>) {
        info!(
            "Catalog for {} replaced: {} -> {} matches",
            date,
            self.matches.len(),
            matches.len()
        );
        self.matches = matches;
        self.date = Some(date);
        self.generation += 1;
    }

    pub fn filter(&self, filter: MatchFilter) -> FilteredMatches<'_, slice::Iter<'_, Match>> {
        FilteredMatches::new(self.matches.iter(), filter)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|game| game.match_id == match_id)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Number of successful refreshes so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Fetches and decodes one day's matches without touching any catalog.
pub async fn fetch_catalog<F: RemoteFeed>(feed: &F, date: &str) -> Result<Vec<Match>, AppError> {
    let response = feed.fetch_day_schedule(date).await?;
    Ok(process_schedule(&response, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{FakeFeed, TestDataBuilder};

    const DATE: &str = "2021-07-29";

    fn ids<'a>(matches: impl Iterator<Item = &'a Match>) -> Vec<&'a str> {
        matches.map(|game| game.match_id.as_str()).collect()
    }

    fn scenario_catalog() -> MatchCatalog {
        let mut catalog = MatchCatalog::new();
        catalog.replace(
            DATE.to_string(),
            vec![
                TestDataBuilder::create_match("A", LivePeriod::InProgress),
                TestDataBuilder::create_gold_match("B", LivePeriod::NotStarted),
            ],
        );
        catalog
    }

    #[test]
    fn test_live_gold_upcoming_scenario() {
        let catalog = scenario_catalog();
        assert_eq!(ids(catalog.filter(MatchFilter::Live)), vec!["A"]);
        assert_eq!(ids(catalog.filter(MatchFilter::Gold)), vec!["B"]);
        assert_eq!(ids(catalog.filter(MatchFilter::Upcoming)), vec!["B"]);
    }

    #[test]
    fn test_has_score_is_finished_union_in_progress() {
        let mut catalog = MatchCatalog::new();
        catalog.replace(
            DATE.to_string(),
            vec![
                TestDataBuilder::create_match("A", LivePeriod::Finished),
                TestDataBuilder::create_match("B", LivePeriod::NotStarted),
                TestDataBuilder::create_match("C", LivePeriod::InProgress),
                TestDataBuilder::create_match("D", LivePeriod::Finished),
            ],
        );

        let has_score = ids(catalog.filter(MatchFilter::HasScore));
        let union: Vec<&str> = catalog
            .matches()
            .iter()
            .filter(|game| {
                MatchFilter::Finished.matches(game) || MatchFilter::Live.matches(game)
            })
            .map(|game| game.match_id.as_str())
            .collect();
        assert_eq!(has_score, union);
        assert_eq!(has_score, vec!["A", "C", "D"]);
    }

    #[test]
    fn test_views_are_restartable_and_chainable() {
        let mut catalog = MatchCatalog::new();
        catalog.replace(
            DATE.to_string(),
            vec![
                TestDataBuilder::create_gold_match("A", LivePeriod::InProgress),
                TestDataBuilder::create_match("B", LivePeriod::InProgress),
                TestDataBuilder::create_gold_match("C", LivePeriod::Finished),
            ],
        );

        let gold = catalog.filter(MatchFilter::Gold);
        let again = gold.clone();
        assert_eq!(ids(gold), vec!["A", "C"]);
        assert_eq!(ids(again), vec!["A", "C"]);

        let live_gold = catalog.filter(MatchFilter::Gold).refine(MatchFilter::Live);
        assert_eq!(live_gold.filters(), &[MatchFilter::Gold, MatchFilter::Live]);
        assert_eq!(ids(live_gold), vec!["A"]);

        let via_ext = catalog
            .matches()
            .iter()
            .filter_by(MatchFilter::Live)
            .refine(MatchFilter::Gold);
        assert_eq!(ids(via_ext), vec!["A"]);
    }

    #[tokio::test]
    async fn test_refresh_replaces_instead_of_appending() {
        let feed = FakeFeed::new();
        feed.set_schedule(
            DATE,
            TestDataBuilder::schedule_response(
                DATE,
                vec![
                    TestDataBuilder::schedule_entry("A", "a", 1, "0", "0"),
                    TestDataBuilder::schedule_entry("B", "b", 0, "1", "0"),
                ],
            ),
        );

        let mut catalog = MatchCatalog::new();
        catalog.refresh(&feed, DATE).await.unwrap();
        catalog.refresh(&feed, DATE).await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.generation(), 2);
        assert_eq!(catalog.date(), Some(DATE));
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_catalog_unchanged() {
        let feed = FakeFeed::new();
        let mut catalog = scenario_catalog();
        let before = catalog.matches().to_vec();

        feed.fail_schedule(DATE, "boom");
        assert!(catalog.refresh(&feed, DATE).await.is_err());

        assert_eq!(catalog.matches(), before.as_slice());
        assert_eq!(catalog.generation(), 1);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = scenario_catalog();
        assert_eq!(catalog.get("B").map(|game| game.is_gold_medal), Some(true));
        assert!(catalog.get("Z").is_none());
    }
}
