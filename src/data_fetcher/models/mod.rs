pub mod matches;
pub mod schedule;
pub mod score;

pub use matches::{LivePeriod, Match};
pub use schedule::{MatchInfo, ScheduleData, ScheduleDay, ScheduleEntry, ScheduleResponse};
pub use score::{ScoreOutcome, ScorePayload, ScoreTable};
