use olympic_teletext::{
    data_fetcher::models::{LivePeriod, ScoreOutcome, ScoreTable},
    data_fetcher::processors::{ScoreTableBuilder, build_table, format_table},
    error::AppError,
    testing_utils::{FakeFeed, TestDataBuilder},
};
use serde_json::json;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

fn table_of(outcome: ScoreOutcome) -> ScoreTable {
    match outcome {
        ScoreOutcome::Table(table) => table,
        ScoreOutcome::NoScoreYet => panic!("expected a table"),
    }
}

#[tokio::test]
async fn test_header_named_after_match_and_short_row_dropped() {
    let feed = Arc::new(FakeFeed::new());
    feed.set_score(
        "A",
        TestDataBuilder::score_payload(&[&["H", "Col1", "Col2"], &["R1", "1", "2"], &["bad", "3"]]),
    );
    let builder = ScoreTableBuilder::new(feed);
    let game = TestDataBuilder::create_match("A", LivePeriod::InProgress);

    let table = table_of(builder.build(&game).await.unwrap());
    assert_eq!(table.header, vec!["A", "Col1", "Col2"]);
    assert_eq!(table.rows, vec![vec!["R1", "1", "2"]]);
}

#[test]
fn test_uniform_rows_consume_only_the_header() {
    for count in [1usize, 2, 5, 12] {
        let raw: Vec<Vec<String>> = (0..count)
            .map(|i| vec![format!("r{i}"), i.to_string(), (i * 2).to_string(), "x".into()])
            .collect();
        let raw_refs: Vec<Vec<&str>> = raw
            .iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect();
        let slices: Vec<&[&str]> = raw_refs.iter().map(Vec::as_slice).collect();
        let rows = TestDataBuilder::raw_score_rows(&slices);

        let table = build_table(&rows, "M").unwrap();
        assert_eq!(table.rows.len(), count - 1);
        assert!(table.rows.iter().all(|row| row.len() == table.header.len()));
    }
}

#[tokio::test]
async fn test_missing_stats_is_no_score_yet() {
    let feed = Arc::new(FakeFeed::new());
    feed.set_score(
        "N",
        olympic_teletext::data_fetcher::models::ScorePayload(json!({ "data": {} })),
    );
    feed.set_score("E", TestDataBuilder::score_payload(&[]));
    let builder = ScoreTableBuilder::new(feed);

    for id in ["N", "E"] {
        let game = TestDataBuilder::create_match(id, LivePeriod::NotStarted);
        assert_eq!(builder.build(&game).await.unwrap(), ScoreOutcome::NoScoreYet);
    }
}

#[tokio::test]
async fn test_fetch_error_is_returned() {
    let feed = Arc::new(FakeFeed::new());
    feed.fail_score("A", "boom");
    let builder = ScoreTableBuilder::new(feed);
    let game = TestDataBuilder::create_match("A", LivePeriod::InProgress);

    let err = builder.build(&game).await.unwrap_err();
    assert!(matches!(err, AppError::ApiNoData { .. }));
}

#[tokio::test]
async fn test_finished_tables_are_cached_live_ones_are_not() {
    let feed = Arc::new(FakeFeed::new());
    let payload = TestDataBuilder::score_payload(&[&["H", "Pts"], &["X", "9"]]);
    feed.set_score("F", payload.clone());
    feed.set_score("L", payload);
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

#[test]
fn test_formatted_table_lines_up_wide_names() {
    let table = ScoreTable {
        header: vec!["游泳".to_string(), "Time".to_string()],
        rows: vec![vec!["Lane 4".to_string(), "47.02".to_string()]],
    };
    let text = format_table(&table);
    let lines: Vec<&str> = text.lines().collect();
    // rule, header, rule, row, rule
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|line| line.width() == lines[0].width()));
}

#[tokio::test]
async fn test_bad_header_row_is_no_score_yet() {
    let feed = Arc::new(FakeFeed::new());
    feed.set_score(
        "A",
        olympic_teletext::data_fetcher::models::ScorePayload(json!({ "data": { "stats": [ { "rows": [
            [ { "html": "H" }, { "nohtml": 1 }, { "html": "Col2" } ],
            [ { "html": "R1" }, { "html": "1" } ],
            [ { "html": "R2" }, { "html": "2" } ]
        ] } ] } })),
    );
    let builder = ScoreTableBuilder::new(feed);
    let game = TestDataBuilder::create_match("A", LivePeriod::InProgress);

    assert_eq!(builder.build(&game).await.unwrap(), ScoreOutcome::NoScoreYet);
}
