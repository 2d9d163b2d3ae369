use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw stat-detail payload. The table lives at `data.stats[0].rows`, but matches that
/// have not started usually come back without that path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ScorePayload(pub Value);

impl ScorePayload {
    /// The raw rows, or `None` when the stats path is absent, not an array, or empty.
    pub fn rows(&self) -> Option<&[Value]> {
        self.0
            .pointer("/data/stats/0/rows")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .filter(|rows| !rows.is_empty())
    }
}

/// A header-plus-rows grid for one match. Every row has exactly `header.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ScoreTable {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Successful result of building a score table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreOutcome {
    Table(ScoreTable),
    /// The feed has nothing for this match yet. Expected for matches that have not started.
    NoScoreYet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_found_at_stats_path() {
        let payload = ScorePayload(json!({
            "data": { "stats": [ { "rows": [ [ { "html": "H" } ] ] } ] }
        }));
        assert_eq!(payload.rows().map(<[Value]>::len), Some(1));
    }

    #[test]
    fn test_rows_missing_path() {
        assert!(ScorePayload(json!({})).rows().is_none());
        assert!(ScorePayload(json!({ "data": { "stats": [] } })).rows().is_none());
        assert!(ScorePayload(json!({ "data": { "stats": [ {} ] } })).rows().is_none());
        assert!(ScorePayload(json!({ "data": [] })).rows().is_none());
    }

    #[test]
    fn test_rows_empty_or_wrong_type() {
        let empty = ScorePayload(json!({ "data": { "stats": [ { "rows": [] } ] } }));
        assert!(empty.rows().is_none());

        let wrong = ScorePayload(json!({ "data": { "stats": [ { "rows": "n/a" } ] } }));
        assert!(wrong.rows().is_none());
    }
}
