//! Integration tests for rankgraph-config crate.

use rankgraph_common::test_utils::discord_fixtures;
use rankgraph_common::ChannelId;
use rankgraph_config::{
    Config, ConfigError, ConfigLoader, ENV_BOT_TOKEN, ENV_CHANNEL_ID, ENV_CONFIG_PATH,
    ENV_FETCH_TIMEOUT, ENV_MESSAGE_LIMIT, ENV_OPEN_VIEWER, ENV_OUTPUT_PATH,
};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

fn env(pairs: Vec<(&'static str, String)>) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<&'static str, String> = pairs.into_iter().collect();
    move |key| map.get(key).cloned()
}

fn required() -> Vec<(&'static str, String)> {
    vec![
        (ENV_BOT_TOKEN, discord_fixtures::test_token().to_string()),
        (ENV_CHANNEL_ID, discord_fixtures::test_channel_id().to_string()),
    ]
}

#[test]
fn test_default_chart_parameters() {
    let config = Config::default();

    assert_eq!(config.chart.output_path, PathBuf::from("rank_evolution.png"));
    assert_eq!((config.chart.width, config.chart.height), (1920, 1080));
    assert_eq!((config.chart.rank_min, config.chart.rank_max), (0, 1000));
    assert_eq!(config.chart.title, "Rank Evolution Over Time");
    assert_eq!(config.chart.x_label, "Date and Time");
    assert_eq!(config.chart.y_label, "Rank");
    assert!(config.chart.show_grid);
    assert_eq!(config.discord.message_limit, 50);
    assert_eq!(config.discord.fetch_timeout_seconds, 30);
}

#[test]
fn test_load_from_required_variables() {
    let config = ConfigLoader::load_with(env(required())).unwrap();

    assert_eq!(config.discord.token, discord_fixtures::test_token());
    assert_eq!(config.discord.channel_id, discord_fixtures::test_channel_id());
    assert!(config.chart.open_viewer);
}

#[test]
fn test_missing_token_is_fatal() {
    let err = ConfigLoader::load_with(env(vec![(ENV_CHANNEL_ID, "42".to_string())])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingConfig(ref var) if var == ENV_BOT_TOKEN));
}

#[test]
fn test_missing_channel_is_fatal() {
    let err =
        ConfigLoader::load_with(env(vec![(ENV_BOT_TOKEN, "token".to_string())])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingConfig(ref var) if var == ENV_CHANNEL_ID));
}

#[test]
fn test_optional_overrides() {
    let mut vars = required();
    vars.push((ENV_MESSAGE_LIMIT, "100".to_string()));
    vars.push((ENV_FETCH_TIMEOUT, "5".to_string()));
    vars.push((ENV_OUTPUT_PATH, "out/ranks.png".to_string()));
    vars.push((ENV_OPEN_VIEWER, "false".to_string()));

    let config = ConfigLoader::load_with(env(vars)).unwrap();
    assert_eq!(config.discord.message_limit, 100);
    assert_eq!(config.discord.fetch_timeout_seconds, 5);
    assert_eq!(config.chart.output_path, PathBuf::from("out/ranks.png"));
    assert!(!config.chart.open_viewer);
}

#[test]
fn test_out_of_range_limit_rejected() {
    let mut vars = required();
    vars.push((ENV_MESSAGE_LIMIT, "250".to_string()));

    // 250 fits in u8 but exceeds the platform maximum.
    let err = ConfigLoader::load_with(env(vars)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_yaml_file_with_env_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "discord:\n  channel_id: 555\n  message_limit: 20\nchart:\n  width: 800\n  height: 600\n  colors:\n    line: \"#000000\"\n"
    )
    .unwrap();

    let mut vars = required();
    vars.push((ENV_CONFIG_PATH, file.path().display().to_string()));

    let config = ConfigLoader::load_with(env(vars)).unwrap();

    // Environment wins over the file for the channel.
    assert_eq!(config.discord.channel_id, discord_fixtures::test_channel_id());
    assert_ne!(config.discord.channel_id, ChannelId(555));
    assert_eq!(config.discord.message_limit, 20);
    assert_eq!((config.chart.width, config.chart.height), (800, 600));
    assert_eq!(config.chart.colors.line, "#000000");
    // Untouched fields keep their defaults.
    assert_eq!(config.chart.colors.min_marker, "#ff0000");
    assert_eq!(config.chart.title, "Rank Evolution Over Time");
}

#[test]
fn test_missing_yaml_file() {
    let mut vars = required();
    vars.push((ENV_CONFIG_PATH, "/nonexistent/rankgraph.yaml".to_string()));

    let err = ConfigLoader::load_with(env(vars)).unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
}
