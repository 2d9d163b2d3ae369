use crate::constants::labels;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of a match. The feed encodes it as 0/1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LivePeriod {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

impl LivePeriod {
    /// Maps the feed's numeric code; anything outside 0..=2 is `NotStarted`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => LivePeriod::InProgress,
            2 => LivePeriod::Finished,
            _ => LivePeriod::NotStarted,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            LivePeriod::NotStarted => 0,
            LivePeriod::InProgress => 1,
            LivePeriod::Finished => 2,
        }
    }
}

/// One scheduled or in-progress event of the day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub name: String,
    pub start_time: String,
    pub is_home_team: bool,
    pub is_gold_medal: bool,
    pub match_id: String,
    pub round_label: String,
    pub live_period: LivePeriod,
}

impl Match {
    pub fn has_score(&self) -> bool {
        self.live_period != LivePeriod::NotStarted
    }

    pub fn is_live(&self) -> bool {
        self.live_period == LivePeriod::InProgress
    }

    pub fn is_finished(&self) -> bool {
        self.live_period == LivePeriod::Finished
    }

    /// Menu label: name, start time, round and the gold / home markers.
    pub fn display_label(&self) -> String {
        let mut extra = self.round_label.clone();
        if self.is_gold_medal {
            extra.push_str(labels::GOLD_MARKER);
        }
        if self.is_home_team {
            extra.push_str(labels::HOME_MARKER);
        }
        format!("{}  {}  {}", self.name, self.start_time, extra)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}
