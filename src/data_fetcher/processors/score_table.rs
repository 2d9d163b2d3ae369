//! Score table construction from the stat-detail payload.

use crate::data_fetcher::api::RemoteFeed;
use crate::data_fetcher::cache::ScoreCache;
use crate::data_fetcher::models::{Match, ScoreOutcome, ScorePayload, ScoreTable};
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};
use unicode_width::UnicodeWidthStr;

/// Fetches a match's raw score rows and turns them into a [`ScoreTable`].
///
/// Tables of finished matches are cached; everything else is fetched every time.
pub struct ScoreTableBuilder<F> {
    feed: Arc<F>,
    cache: ScoreCache,
}

impl<F> Clone for ScoreTableBuilder<F> {
    fn clone(&self) -> Self {
        Self {
            feed: Arc::clone(&self.feed),
            cache: self.cache.clone(),
        }
    }
}

impl<F: RemoteFeed> ScoreTableBuilder<F> {
    pub fn new(feed: Arc<F>) -> Self {
        Self::with_cache(feed, ScoreCache::default())
    }

    pub fn with_cache(feed: Arc<F>, cache: ScoreCache) -> Self {
        Self { feed, cache }
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    /// Builds the table for `game`.
    ///
    /// A missing stats path is `NoScoreYet`, not an error. Transport and parse
    /// failures come back as `Err`.
    #[instrument(skip(self, game), fields(match_id = %game.match_id))]
    pub async fn build(&self, game: &Match) -> Result<ScoreOutcome, AppError> {
        if game.is_finished()
            && let Some(table) = self.cache.get(&game.match_id).await
        {
            debug!("Using cached score table");
            return Ok(ScoreOutcome::Table(table));
        }

        let payload = self.feed.fetch_match_score(&game.match_id).await?;
        let outcome = score_outcome_from_payload(&payload, &game.name);

        if game.is_finished()
            && let ScoreOutcome::Table(table) = &outcome
        {
            self.cache.put(game.match_id.clone(), table.clone()).await;
        }

        Ok(outcome)
    }
}

/// Pure part of [`ScoreTableBuilder::build`].
pub fn score_outcome_from_payload(payload: &ScorePayload, display_name: &str) -> ScoreOutcome {
    payload
        .rows()
        .and_then(|rows| build_table(rows, display_name))
        .map_or(ScoreOutcome::NoScoreYet, ScoreOutcome::Table)
}

/// Builds a table from raw rows.
///
/// Row 0 is the header, its first label replaced by `display_name`. A header that is not
/// an array, is empty, or has an unusable cell gives `None`. Data rows that cannot be
/// decoded or whose cell count differs from the header are dropped.
pub fn build_table(raw_rows: &[Value], display_name: &str) -> Option<ScoreTable> {
    let (first, rest) = raw_rows.split_first()?;

    let mut header = decode_row(first)?;
    if header.is_empty() {
        return None;
    }
    header[0] = display_name.to_string();

    let column_count = header.len();
    let rows: Vec<Vec<String>> = rest
        .iter()
        .filter_map(decode_row)
        .filter(|row| row.len() == column_count)
        .collect();

    let dropped = rest.len() - rows.len();
    if dropped > 0 {
        debug!("Dropped {dropped} malformed score rows");
    }

    Some(ScoreTable { header, rows })
}

/// Decodes one row; `None` if it is not an array or any cell is unusable.
fn decode_row(row: &Value) -> Option<Vec<String>> {
    row.as_array()?.iter().map(decode_cell).collect()
}

/// A cell is normally `{ "html": "..." }`; bare strings and numbers are accepted too.
fn decode_cell(cell: &Value) -> Option<String> {
    match cell {
        Value::Object(map) => match map.get("html")? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        },
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Renders the table as a fixed-width grid with centred cells.
///
/// Column widths use display width so CJK names line up.
pub fn format_table(table: &ScoreTable) -> String {
    let widths: Vec<usize> = (0..table.column_count())
        .map(|col| {
            std::iter::once(&table.header)
                .chain(table.rows.iter())
                .map(|row| row[col].width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let format_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(&widths) {
            let padding = width - cell.width();
            let left = padding / 2;
            line.push(' ');
            line.push_str(&" ".repeat(left));
            line.push_str(cell);
            line.push_str(&" ".repeat(padding - left));
            line.push_str(" |");
        }
        line
    };

    let mut lines = vec![separator.clone(), format_row(&table.header), separator.clone()];
    lines.extend(table.rows.iter().map(|row| format_row(row)));
    if !table.rows.is_empty() {
        lines.push(separator);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::LivePeriod;
    use crate::testing_utils::{FakeFeed, TestDataBuilder};
    use serde_json::json;

    #[test]
    fn test_build_table_drops_mismatched_rows() {
        let rows = TestDataBuilder::raw_score_rows(&[
            &["H", "Col1", "Col2"],
            &["R1", "1", "2"],
            &["bad", "3"],
        ]);

        let table = build_table(&rows, "A").unwrap();

        assert_eq!(table.header, vec!["A", "Col1", "Col2"]);
        assert_eq!(table.rows, vec![vec!["R1", "1", "2"]]);
    }

    #[test]
    fn test_uniform_rows_keep_all_but_header() {
        let rows = TestDataBuilder::raw_score_rows(&[
            &["选手", "国家", "成绩"],
            &["甲", "中国", "9.80"],
            &["乙", "美国", "9.85"],
            &["丙", "牙买加", "9.90"],
        ]);

        let table = build_table(&rows, "男子100米").unwrap();

        assert_eq!(table.rows.len(), rows.len() - 1);
        assert!(table.rows.iter().all(|row| row.len() == table.header.len()));
    }

    #[test]
    fn test_rows_that_do_not_decode_are_dropped() {
        let rows = vec![
            json!([{ "html": "H" }, { "html": "分数" }]),
            json!("not a row"),
            json!([{ "html": "R1" }, { "nope": 1 }]),
            json!([{ "html": "R2" }, { "html": 7 }]),
        ];

        let table = build_table(&rows, "M").unwrap();

        assert_eq!(table.header, vec!["M", "分数"]);
        assert_eq!(table.rows, vec![vec!["R2", "7"]]);
    }

    #[test]
    fn test_unusable_header_row_is_no_table() {
        let rows = vec![
            json!([{ "html": "H" }, { "nohtml": 1 }, { "html": "Col2" }]),
            json!([{ "html": "R1" }, { "html": "1" }]),
            json!([{ "html": "R2" }, { "html": "2" }]),
        ];
        assert!(build_table(&rows, "A").is_none());

        let not_an_array = vec![json!("header"), json!([{ "html": "R1" }])];
        assert!(build_table(&not_an_array, "A").is_none());

        let payload = ScorePayload(json!({ "data": { "stats": [ { "rows": rows } ] } }));
        assert_eq!(
            score_outcome_from_payload(&payload, "A"),
            ScoreOutcome::NoScoreYet
        );
    }

    #[test]
    fn test_empty_header_is_no_table() {
        assert!(build_table(&[json!([])], "M").is_none());
        assert!(build_table(&[], "M").is_none());
    }

    #[test]
    fn test_outcome_without_stats_is_no_score_yet() {
        let payload = ScorePayload(json!({ "data": {} }));
        assert_eq!(
            score_outcome_from_payload(&payload, "A"),
            ScoreOutcome::NoScoreYet
        );
    }

    #[test]
    fn test_format_table_aligns_wide_characters() {
        let table = ScoreTable {
            header: vec!["射箭".to_string(), "环数".to_string()],
            rows: vec![vec!["A".to_string(), "10".to_string()]],
        };

        let text = format_table(&table);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "+------+------+");
        assert_eq!(lines[1], "| 射箭 | 环数 |");
        assert_eq!(lines[3], "|  A   |  10  |");
        assert!(lines.iter().all(|l| l.width() == lines[0].width()));
    }

    #[test]
    fn test_format_table_header_only() {
        let table = ScoreTable {
            header: vec!["M".to_string()],
            rows: vec![],
        };
        assert_eq!(format_table(&table), "+---+\n| M |\n+---+");
    }

    #[tokio::test]
    async fn test_builder_caches_finished_matches_only() {
        let feed = Arc::new(FakeFeed::new());
        feed.set_score("F", TestDataBuilder::score_payload(&[&["H", "X"], &["r", "1"]]));
        feed.set_score("L", TestDataBuilder::score_payload(&[&["H", "X"], &["r", "1"]]));
        let builder = ScoreTableBuilder::new(Arc::clone(&feed));

        let finished = TestDataBuilder::create_match("F", LivePeriod::Finished);
        let live = TestDataBuilder::create_match("L", LivePeriod::InProgress);

        for _ in 0..3 {
            builder.build(&finished).await.unwrap();
            builder.build(&live).await.unwrap();
        }

        assert_eq!(feed.score_calls("F"), 1);
        assert_eq!(feed.score_calls("L"), 3);
        assert_eq!(builder.cache().len().await, 1);
    }

    #[tokio::test]
    async fn test_builder_surfaces_fetch_errors() {
        let feed = Arc::new(FakeFeed::new());
        feed.fail_score("A", "boom");
        let builder = ScoreTableBuilder::new(feed);

        let game = TestDataBuilder::create_match("A", LivePeriod::InProgress);
        let result = builder.build(&game).await;

        assert!(matches!(result, Err(e) if e.is_fetch_error()));
    }
}
