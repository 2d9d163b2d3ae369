use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Top level of the day schedule response. Only `data.matches` is required; a payload
/// without it cannot be interpreted and is reported as a fetch error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub data: ScheduleData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleData {
    /// Keyed by `YYYY-MM-DD`.
    pub matches: HashMap<String, ScheduleDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleDay {
    /// Entries are kept raw so one malformed entry cannot sink the whole day.
    #[serde(default)]
    pub list: Vec<Value>,
}

/// One entry of a day's list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleEntry {
    #[serde(rename = "categoryId", default)]
    pub category_id: Option<Value>,
    #[serde(rename = "matchInfo", default)]
    pub match_info: Option<MatchInfo>,
}

/// Loosely typed match fields. The feed sends flags and enums as strings, numbers or
/// nothing at all, so they stay as raw values until decoded.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchInfo {
    #[serde(rename = "matchDesc", default)]
    pub match_desc: Option<String>,
    #[serde(rename = "startTime", default)]
    pub start_time: Option<String>,
    #[serde(rename = "isChina", default)]
    pub is_china: Option<Value>,
    #[serde(rename = "isGold", default)]
    pub is_gold: Option<Value>,
    #[serde(default)]
    pub mid: Option<Value>,
    #[serde(default)]
    pub quarter: Option<Value>,
    #[serde(rename = "livePeriod", default)]
    pub live_period: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_response_requires_matches() {
        let missing = json!({ "data": {} });
        assert!(serde_json::from_value::<ScheduleResponse>(missing).is_err());

        let present = json!({ "data": { "matches": {} } });
        let parsed = serde_json::from_value::<ScheduleResponse>(present).unwrap();
        assert!(parsed.data.matches.is_empty());
    }

    #[test]
    fn test_schedule_day_keeps_raw_entries() {
        let payload = json!({
            "data": {
                "matches": {
                    "2021-07-29": { "list": [ "garbage", { "categoryId": "5" } ] }
                }
            }
        });
        let parsed = serde_json::from_value::<ScheduleResponse>(payload).unwrap();
        assert_eq!(parsed.data.matches["2021-07-29"].list.len(), 2);
    }

    #[test]
    fn test_match_info_tolerates_missing_fields() {
        let entry: ScheduleEntry = serde_json::from_value(json!({
            "categoryId": 5,
            "matchInfo": { "matchDesc": "女子双人3米板决赛", "mid": "100000:1" }
        }))
        .unwrap();
        let info = entry.match_info.unwrap();
        assert_eq!(info.match_desc.as_deref(), Some("女子双人3米板决赛"));
        assert!(info.is_gold.is_none());
        assert!(info.live_period.is_none());
    }
}
