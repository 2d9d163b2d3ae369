use olympic_teletext::{config::Config, error::AppError};
use serial_test::serial;
use tempfile::tempdir;

#[tokio::test]
async fn test_saved_config_round_trips_through_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");
    let path_str = path.to_string_lossy().to_string();

    let config = Config {
        api_domain: "feed.example.com".to_string(),
        column_id: 7,
        log_file_path: None,
        http_timeout_seconds: 12,
        max_nav_depth: 4,
    };
    config.save_to_path(&path_str).await.unwrap();

    let loaded = Config::load_from_path(&path_str).await.unwrap();
    assert_eq!(loaded.api_domain, "https://feed.example.com");
    assert_eq!(loaded.column_id, 7);
    assert_eq!(loaded.http_timeout_seconds, 12);
    assert_eq!(loaded.max_nav_depth, 4);
    assert!(loaded.validate().is_ok());
}

#[tokio::test]
async fn test_partial_file_fills_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");
    tokio::fs::write(&path, "max_nav_depth = 6\n").await.unwrap();

    let loaded = Config::load_from_path(&path.to_string_lossy()).await.unwrap();
    let defaults = Config::default();
    assert_eq!(loaded.max_nav_depth, 6);
    assert_eq!(loaded.api_domain, defaults.api_domain);
    assert_eq!(loaded.column_id, defaults.column_id);
}

#[test]
fn test_invalid_values_are_rejected() {
    let zero_depth = Config {
        max_nav_depth: 0,
        ..Config::default()
    };
    assert!(matches!(zero_depth.validate(), Err(AppError::Config(_))));

    let zero_timeout = Config {
        http_timeout_seconds: 0,
        ..Config::default()
    };
    assert!(zero_timeout.validate().is_err());

    let bad_domain = Config {
        api_domain: "not a domain".to_string(),
        ..Config::default()
    };
    assert!(bad_domain.validate().is_err());
}

#[test]
#[serial]
fn test_environment_overrides_win() {
    unsafe {
        std::env::set_var("OLYMPIC_API_DOMAIN", "https://mirror.example.com");
        std::env::set_var("OLYMPIC_MAX_DEPTH", "5");
        std::env::set_var("OLYMPIC_HTTP_TIMEOUT", "soon");
    }

    let mut config = Config::default();
    config.apply_env_overrides();

    unsafe {
        std::env::remove_var("OLYMPIC_API_DOMAIN");
        std::env::remove_var("OLYMPIC_MAX_DEPTH");
        std::env::remove_var("OLYMPIC_HTTP_TIMEOUT");
    }

    assert_eq!(config.api_domain, "https://mirror.example.com");
    assert_eq!(config.max_nav_depth, 5);
    // unparseable numbers are ignored
    assert_eq!(
        config.http_timeout_seconds,
        Config::default().http_timeout_seconds
    );
}

#[cfg(target_os = "linux")]
#[tokio::test]
#[serial]
async fn test_load_without_file_uses_defaults_then_save_persists() {
    let temp_dir = tempdir().unwrap();
    let previous = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let loaded = Config::load().await.unwrap();
    assert_eq!(loaded.max_nav_depth, Config::default().max_nav_depth);

    let updated = Config {
        max_nav_depth: 2,
        ..loaded
    };
    updated.save().await.unwrap();
    let reloaded = Config::load().await.unwrap();

    unsafe {
        match previous {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    assert!(Config::get_config_path().contains("olympic_teletext"));
    assert_eq!(reloaded.max_nav_depth, 2);
}
