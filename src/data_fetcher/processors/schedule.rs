use super::flags::{decode_flag, decode_integer, decode_live_period, value_to_text};
use crate::constants::MAX_NON_EVENT_CATEGORY_ID;
use crate::data_fetcher::models::{Match, ScheduleEntry, ScheduleResponse};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Turns a day schedule into matches, in feed order.
///
/// A date missing from `data.matches` means nothing is scheduled. Entries that are not
/// objects, carry no `matchInfo`, or have no `mid` are skipped; editorial entries with a
/// category id at or below the event threshold are filtered out.
pub fn process_schedule(response: &ScheduleResponse, date: &str) -> Vec<Match> {
    let Some(day) = response.data.matches.get(date) else {
        info!("No schedule for {date} in response");
        return Vec::new();
    };

    let mut skipped = 0usize;
    let matches: Vec<Match> = day
        .list
        .iter()
        .filter_map(|entry| {
            let decoded = decode_entry(entry);
            if decoded.is_none() {
                skipped += 1;
            }
            decoded
        })
        .collect();

    debug!(
        "Processed schedule for {}: {} matches, {} entries skipped",
        date,
        matches.len(),
        skipped
    );

    matches
}

/// Decodes one raw list entry.
pub fn decode_entry(entry: &Value) -> Option<Match> {
    let entry: ScheduleEntry = match serde_json::from_value(entry.clone()) {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Skipping malformed schedule entry: {e}");
            return None;
        }
    };

    if let Some(category) = decode_integer(entry.category_id.as_ref())
        && category <= MAX_NON_EVENT_CATEGORY_ID
    {
        debug!("Skipping non-event entry with category {category}");
        return None;
    }

    let Some(info) = entry.match_info else {
        warn!("Skipping schedule entry without matchInfo");
        return None;
    };

    let match_id = value_to_text(info.mid.as_ref());
    if match_id.is_empty() {
        warn!(
            "Skipping match {:?} without an id",
            info.match_desc.as_deref().unwrap_or("")
        );
        return None;
    }

    Some(Match {
        name: info.match_desc.unwrap_or_default(),
        start_time: info.start_time.unwrap_or_default(),
        is_home_team: decode_flag(info.is_china.as_ref()),
        is_gold_medal: decode_flag(info.is_gold.as_ref()),
        match_id,
        round_label: value_to_text(info.quarter.as_ref()),
        live_period: decode_live_period(info.live_period.as_ref()),
    })
}
