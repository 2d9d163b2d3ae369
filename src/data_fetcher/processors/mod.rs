pub mod flags;
pub mod schedule;
pub mod score_table;

pub use flags::{decode_flag, decode_integer, decode_live_period, value_to_text};
pub use schedule::{decode_entry, process_schedule};
pub use score_table::{ScoreTableBuilder, build_table, format_table, score_outcome_from_payload};
