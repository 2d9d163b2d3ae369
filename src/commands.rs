use crate::cli::Args;
use chrono::{Local, NaiveDate};
use crossterm::{execute, terminal::SetTitle};
use olympic_teletext::config::Config;
use olympic_teletext::constants::labels::TERMINAL_TITLE;
use olympic_teletext::error::AppError;
use std::io::stdout;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// Starts from the stored config (or defaults when there is none), applies the
/// requested changes, validates and saves.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = if std::path::Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(new_domain) = &args.new_api_domain {
        config.api_domain = new_domain.trim().to_string();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Resolves the date to show: `--date` when given and valid, otherwise today.
pub fn resolve_date(args: &Args) -> Result<String, AppError> {
    match &args.date {
        Some(date) => parse_date_arg(date),
        None => Ok(Local::now().format(DATE_FORMAT).to_string()),
    }
}

fn parse_date_arg(date: &str) -> Result<String, AppError> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|e| {
            AppError::datetime_parse_error(format!(
                "Invalid date '{date}', expected YYYY-MM-DD: {e}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_date_is_normalized() {
        assert_eq!(parse_date_arg(" 2021-07-29 ").unwrap(), "2021-07-29");
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        for bad in ["2021-13-01", "29.07.2021", "", "yesterday"] {
            let err = parse_date_arg(bad).unwrap_err();
            assert!(matches!(err, AppError::DateTimeParse(_)), "{bad}");
        }
    }

    #[test]
    fn test_default_date_is_today() {
        let args = Args::default();
        let today = Local::now().format(DATE_FORMAT).to_string();
        assert_eq!(resolve_date(&args).unwrap(), today);
    }
}
