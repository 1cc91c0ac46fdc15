//! Config tests.

use crate::config::{parse_flag, AdminConfig, BaseConfig, BotConfig};
use serial_test::serial;
use std::env;

fn clear_env() {
    for key in [
        "BOT_TOKEN",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "LOG_FILE",
        "BOT_ADMIN",
        "BOT_LOG_CHAT",
        "BOT_ADMIN_ONLY",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert!(BaseConfig::log_file_from_env().is_none());
    assert_eq!(config.admin().admin_count(), 0);
    assert!(config.admin().log_chat().is_none());
    assert!(!config.admin().admin_only());
    config.validate().unwrap();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "env_token");
    env::set_var("TELOXIDE_API_URL", "http://localhost:8081");
    env::set_var("LOG_FILE", "logs/telegpt.log");
    env::set_var("BOT_ADMIN", "111, 222,abc,");
    env::set_var("BOT_LOG_CHAT", "-1001");
    env::set_var("BOT_ADMIN_ONLY", "Yes");

    let config = BotConfig::load(Some("cli_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "cli_token");
    assert_eq!(config.telegram_api_url(), Some("http://localhost:8081"));
    assert_eq!(BaseConfig::log_file_from_env().as_deref(), Some("logs/telegpt.log"));
    assert!(config.admin().is_admin(111));
    assert!(config.admin().is_admin(222));
    assert_eq!(config.admin().admin_count(), 2);
    assert_eq!(config.admin().log_chat(), Some(-1001));
    assert!(config.admin().admin_only());
    clear_env();
}

#[test]
#[serial]
fn test_missing_token_is_error() {
    clear_env();
    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_invalid_api_url_fails_validation() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("TELEGRAM_API_URL", "not a url");
    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_blank_log_file_means_stdout_only() {
    clear_env();
    env::set_var("LOG_FILE", "   ");
    assert!(BaseConfig::log_file_from_env().is_none());
    clear_env();
}

#[test]
fn test_invalid_log_chat_is_error() {
    assert!(AdminConfig::from_parts("", Some("ops"), false).is_err());
}

#[test]
fn test_parse_flag() {
    for v in ["1", "true", "TRUE", " on ", "yes"] {
        assert!(parse_flag(v), "{v}");
    }
    for v in ["0", "false", "", "nope"] {
        assert!(!parse_flag(v), "{v}");
    }
}
