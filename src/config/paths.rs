use std::path::Path;

const APP_DIR: &str = "olympic_teletext";

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
        .join("logs")
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_ends_with_app_file() {
        let path = get_config_path();
        assert!(path.ends_with("config.toml"));
        assert!(path.contains(APP_DIR));
    }

    #[test]
    fn test_log_dir_is_inside_app_dir() {
        let path = get_log_dir_path();
        assert!(path.ends_with("logs"));
        assert!(path.contains(APP_DIR));
    }
}
