use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Configuration commands run and exit without starting the dashboard.
pub fn is_config_command(args: &Args) -> bool {
    args.list_config
        || args.new_api_domain.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
}

/// Olympic results in a teletext-style terminal dashboard
///
/// Browse today's events by category (in progress, gold medal finals, home team,
/// upcoming) and open any event for its live score table.
///
/// Keys:
/// - Enter / Space opens the focused entry
/// - Esc / Backspace goes back one level
/// - F5 / r reloads the schedule and returns to the main menu
/// - q / Ctrl-C quits
#[derive(Parser, Debug, Default)]
#[command(about, long_about, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Show events for a specific date in YYYY-MM-DD format instead of today.
    #[arg(long = "date", short = 'd', help_heading = "Display Options")]
    pub date: Option<String>,

    /// Update the feed domain in the config file.
    #[arg(long = "config", help_heading = "Configuration", value_name = "API_DOMAIN")]
    pub new_api_domain: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Keep the terminal in normal mode and log at debug level.
    /// Logs still go to the log file only.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
