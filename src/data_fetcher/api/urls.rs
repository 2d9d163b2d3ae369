//! URL building utilities for feed endpoints

use crate::error::AppError;
use reqwest::Url;

fn endpoint_url(api_domain: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, AppError> {
    let base = format!("{}{path}", api_domain.trim_end_matches('/'));
    Url::parse_with_params(&base, params)
        .map_err(|e| AppError::config_error(format!("Invalid feed URL '{base}': {e}")))
}

/// Builds the day schedule URL.
///
/// # Example
/// ```
/// use olympic_teletext::data_fetcher::api::build_schedule_url;
///
/// let url = build_schedule_url("https://app.sports.qq.com", 130003, "2021-07-29").unwrap();
/// assert_eq!(
///     url,
///     "https://app.sports.qq.com/match/list?columnId=130003&dateNum=1&flag=2&date=2021-07-29&parentChildType=1"
/// );
/// ```
pub fn build_schedule_url(api_domain: &str, column_id: u32, date: &str) -> Result<String, AppError> {
    let column_id = column_id.to_string();
    let url = endpoint_url(
        api_domain,
        "/match/list",
        &[
            ("columnId", column_id.as_str()),
            ("dateNum", "1"),
            ("flag", "2"),
            ("date", date),
            ("parentChildType", "1"),
        ],
    )?;
    Ok(url.into())
}

/// Builds the stat-detail URL for one match. Feed ids contain `:`, which ends up
/// percent-encoded.
///
/// # Example
/// ```
/// use olympic_teletext::data_fetcher::api::build_score_url;
///
/// let url = build_score_url("https://app.sports.qq.com", "100000:1234").unwrap();
/// assert_eq!(url, "https://app.sports.qq.com/TokyoOly/statDetail?mid=100000%3A1234");
/// ```
pub fn build_score_url(api_domain: &str, match_id: &str) -> Result<String, AppError> {
    let url = endpoint_url(api_domain, "/TokyoOly/statDetail", &[("mid", match_id)])?;
    Ok(url.into())
}
