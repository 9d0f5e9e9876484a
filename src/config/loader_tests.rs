//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

// ===== Test Helpers =====

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

// ===== Paths =====

#[test]
fn default_config_path_contains_winlist_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("winlist") && path_str.ends_with("config.toml"),
            "Path should contain 'winlist' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_winlist_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("winlist.log"),
        "Default log path should end with 'winlist.log', got: {:?}",
        path
    );
}

// ===== load_config_file =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp_config(
        "winlist_test_config.toml",
        r#"
estimate_size = 5
overscan = 2
remeasure_threshold = 1
index_strategy = "fenwick"
show_scrollbar = false
wheel_step = 1
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.estimate_size, Some(5));
    assert_eq!(config.overscan, Some(2));
    assert_eq!(config.remeasure_threshold, Some(1));
    assert_eq!(config.index_strategy, Some(IndexStrategy::Fenwick));
    assert_eq!(config.show_scrollbar, Some(false));
    assert_eq!(config.wheel_step, Some(1));
    assert_eq!(config.log_file_path, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp_config("winlist_test_invalid.toml", "overscan = [not valid");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a ParseError, got: {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let config_path = write_temp_config("winlist_test_unknown.toml", "theme = \"monokai\"\n");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_strategy() {
    let config_path = write_temp_config(
        "winlist_test_bad_strategy.toml",
        "index_strategy = \"sparse\"\n",
    );

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn empty_config_file_parses_to_all_none() {
    let config_path = write_temp_config("winlist_test_empty.toml", "");

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config, ConfigFile::default());

    fs::remove_file(config_path).ok();
}

// ===== Precedence =====

#[test]
#[serial(winlist_env)]
fn explicit_path_wins_over_env_var() {
    let explicit = write_temp_config("winlist_test_explicit.toml", "overscan = 11\n");
    let from_env = write_temp_config("winlist_test_env.toml", "overscan = 22\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(config.overscan, Some(11));

    env::remove_var(CONFIG_ENV_VAR);
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(winlist_env)]
fn env_var_path_is_used_without_explicit_path() {
    let from_env = write_temp_config("winlist_test_env_only.toml", "overscan = 22\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.overscan, Some(22));

    env::remove_var(CONFIG_ENV_VAR);
    fs::remove_file(from_env).ok();
}

// ===== merge_config =====

#[test]
fn merge_none_yields_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_partial_file_keeps_other_defaults() {
    let file = ConfigFile {
        overscan: Some(1),
        index_strategy: Some(IndexStrategy::Fenwick),
        ..Default::default()
    };

    let config = merge_config(Some(file));
    let defaults = ResolvedConfig::default();
    assert_eq!(config.overscan, 1);
    assert_eq!(config.index_strategy, IndexStrategy::Fenwick);
    assert_eq!(config.estimate_size, defaults.estimate_size);
    assert_eq!(config.show_scrollbar, defaults.show_scrollbar);
}

#[test]
fn config_file_log_path_overrides_default() {
    let custom_path = PathBuf::from("/custom/path/to/app.log");
    let file = ConfigFile {
        log_file_path: Some(custom_path.clone()),
        ..Default::default()
    };

    assert_eq!(merge_config(Some(file)).log_file_path, custom_path);
}

// ===== Env overrides =====

#[test]
#[serial(winlist_env)]
fn env_overrides_apply_numeric_values() {
    env::set_var(OVERSCAN_ENV_VAR, "9");
    env::set_var(ESTIMATE_ENV_VAR, " 4 ");

    let config = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(config.overscan, 9);
    assert_eq!(config.estimate_size, 4);

    env::remove_var(OVERSCAN_ENV_VAR);
    env::remove_var(ESTIMATE_ENV_VAR);
}

#[test]
#[serial(winlist_env)]
fn env_overrides_ignore_unparseable_values() {
    env::set_var(OVERSCAN_ENV_VAR, "-3");

    let config = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(config.overscan, ResolvedConfig::default().overscan);

    env::remove_var(OVERSCAN_ENV_VAR);
}

// ===== CLI overrides =====

#[test]
fn cli_overrides_take_precedence() {
    let base = merge_config(Some(ConfigFile {
        overscan: Some(1),
        estimate_size: Some(8),
        ..Default::default()
    }));

    let config = apply_cli_overrides(
        base,
        CliOverrides {
            overscan: Some(4),
            index_strategy: Some(IndexStrategy::Fenwick),
            show_scrollbar: Some(false),
            ..Default::default()
        },
    );

    assert_eq!(config.overscan, 4);
    assert_eq!(config.estimate_size, 8, "unset flag keeps file value");
    assert_eq!(config.index_strategy, IndexStrategy::Fenwick);
    assert!(!config.show_scrollbar);
}

#[test]
fn empty_cli_overrides_change_nothing() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), CliOverrides::default()), base);
}
