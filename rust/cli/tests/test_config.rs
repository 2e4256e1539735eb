mod helpers;

use helpers::{clear_config_env, run_cli, set_env, write_file};
use holdem_cli::config::{self, ValueSource};
use serde_json::Value;
use serial_test::serial;

#[test]
#[serial]
fn defaults_when_nothing_is_set() {
    clear_config_env();
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config, config::Config::default());
    assert_eq!(resolved.sources.limit, ValueSource::Default);
    assert_eq!(resolved.sources.seed, ValueSource::Default);
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_config_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "holdem.toml",
        "limit = 100\ntimeout = 30\nseed = 456\nstarting_stack = 100\n",
    );
    set_env("HOLDEM_CONFIG", &path);

    let from_file = config::load_with_sources().unwrap();
    assert_eq!(from_file.config.limit, 100);
    assert_eq!(from_file.config.action_timeout_secs, 30);
    assert_eq!(from_file.config.seed, Some(456));
    assert_eq!(from_file.sources.limit, ValueSource::File);
    assert_eq!(from_file.config.starting_stack, 100);
    assert_eq!(from_file.sources.starting_stack, ValueSource::File);

    set_env("HOLDEM_SEED", "123");
    set_env("HOLDEM_LIMIT", "1000");
    let from_env = config::load_with_sources().unwrap();
    assert_eq!(from_env.config.seed, Some(123));
    assert_eq!(from_env.config.limit, 1_000);
    assert_eq!(from_env.sources.seed, ValueSource::Env);
    assert_eq!(from_env.sources.action_timeout_secs, ValueSource::File);
    clear_config_env();
}

#[test]
#[serial]
fn unknown_tier_is_rejected() {
    clear_config_env();
    set_env("HOLDEM_LIMIT", "250");
    let err = config::load().unwrap_err();
    assert!(err.to_string().contains("limit"), "{}", err);
    clear_config_env();
}

#[test]
#[serial]
fn stack_outside_the_buy_in_range_is_rejected() {
    clear_config_env();
    // default stack of 1000 is over the 10..=100 range of the small tier
    set_env("HOLDEM_LIMIT", "100");
    let err = config::load().unwrap_err();
    assert!(err.to_string().contains("buy-in"), "{}", err);

    set_env("HOLDEM_STARTING_STACK", "50");
    assert_eq!(config::load().unwrap().starting_stack, 50);
    clear_config_env();
}

#[test]
#[serial]
fn unparsable_env_value_is_rejected() {
    clear_config_env();
    set_env("HOLDEM_TIMEOUT", "soon");
    assert!(config::load().is_err());
    set_env("HOLDEM_TIMEOUT", "0");
    assert!(config::load().is_err());
    clear_config_env();
}

#[test]
#[serial]
fn unknown_file_keys_are_rejected() {
    clear_config_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "bad.toml", "blinds = 5\n");
    set_env("HOLDEM_CONFIG", &path);
    assert!(config::load().is_err());
    clear_config_env();
}

#[test]
#[serial]
fn cfg_command_reports_sources() {
    clear_config_env();
    set_env("HOLDEM_STARTING_STACK", "250");
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);

    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["starting_stack"]["value"].as_u64(), Some(250));
    assert_eq!(json["starting_stack"]["source"].as_str(), Some("env"));
    assert_eq!(json["limit"]["value"].as_u64(), Some(1000));
    assert_eq!(json["limit"]["source"].as_str(), Some("default"));
    assert!(json["seed"]["value"].is_null());
    clear_config_env();
}

#[test]
#[serial]
fn cfg_command_fails_on_invalid_config() {
    clear_config_env();
    set_env("HOLDEM_LIMIT", "7");
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("limit"), "{}", res.stderr);
    clear_config_env();
}

#[test]
#[serial]
fn config_seed_drives_deal() {
    clear_config_env();
    set_env("HOLDEM_SEED", "31337");
    let from_env = run_cli(&["deal"]);
    clear_config_env();
    let explicit = run_cli(&["deal", "--seed", "31337"]);
    assert_eq!(from_env.exit_code, 0);
    assert_eq!(from_env.stdout, explicit.stdout);
}
