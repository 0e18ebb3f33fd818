use pokerbot::action::MAX_CHIPS;
use pokerbot::config::PolicyConfig;
use pokerbot::error::BotError;
use pokerbot::round::Street;

#[test]
fn test_default_config_is_valid() {
    let config = PolicyConfig::default();
    config.validate().unwrap();
    assert_eq!(config.total_rounds, 1000);
    assert_eq!(config.starting_stack, 400);
    assert_eq!(config.iterations, 200);
    assert!(!config.shove_pocket_pairs);
}

#[test]
fn test_pot_fraction_by_street() {
    let config = PolicyConfig::default();
    assert_eq!(config.pot_fraction(Street::Preflop), 0.4);
    assert_eq!(config.pot_fraction(Street::Flop), 0.4);
    assert_eq!(config.pot_fraction(Street::Turn), 0.75);
    assert_eq!(config.pot_fraction(Street::River), 0.75);
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = PolicyConfig::from_json_str(r#"{"fold_rate_threshold": 0.6, "iterations": 150}"#).unwrap();
    assert_eq!(config.fold_rate_threshold, 0.6);
    assert_eq!(config.iterations, 150);
    assert_eq!(config.all_in_rate_threshold, 0.40);
    assert_eq!(config.scary_steps, PolicyConfig::default().scary_steps);
}

#[test]
fn test_variant_without_value_shoves() {
    let config = PolicyConfig::from_json_str(
        r#"{"value_shove_equity": null, "shove_pocket_pairs": false, "scary_steps": [[30, 0.2], [10, 0.1]]}"#,
    )
    .unwrap();
    assert_eq!(config.value_shove_equity, None);
    assert!(!config.shove_pocket_pairs);
    assert_eq!(config.scary_steps, vec![(30, 0.2), (10, 0.1)]);
}

#[test]
fn test_json_round_trip() {
    let config = PolicyConfig {
        bankroll_lock_multiplier: 2.0,
        ..PolicyConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(PolicyConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        PolicyConfig::from_json_str("{iterations: 3"),
        Err(BotError::Json(_))
    ));
}

#[test]
fn test_out_of_range_probability() {
    assert!(matches!(
        PolicyConfig::from_json_str(r#"{"bully_call_equity": 1.5}"#),
        Err(BotError::Config(_))
    ));
}

#[test]
fn test_zero_iterations_rejected() {
    assert!(matches!(
        PolicyConfig::from_json_str(r#"{"iterations": 0}"#),
        Err(BotError::Config(_))
    ));
}

#[test]
fn test_unsorted_scary_steps_rejected() {
    assert!(matches!(
        PolicyConfig::from_json_str(r#"{"scary_steps": [[6, 0.15], [100, 0.5]]}"#),
        Err(BotError::Config(_))
    ));
}

#[test]
fn test_from_json_file() {
    let path = std::env::temp_dir().join(format!("pokerbot-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"total_rounds": 500}"#).unwrap();
    let config = PolicyConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(config.total_rounds, 500);
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("pokerbot-no-such-config.json");
    assert!(matches!(PolicyConfig::from_json_file(&path), Err(BotError::Io(_))));
}

#[test]
fn test_oversized_stack_rejected() {
    let json = format!(r#"{{"starting_stack": {}}}"#, MAX_CHIPS + 1);
    assert!(matches!(PolicyConfig::from_json_str(&json), Err(BotError::Config(_))));
}
