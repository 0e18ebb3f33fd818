use std::time::Duration;

use approx::assert_relative_eq;
use pokerbot::config::PolicyConfig;
use pokerbot::math_engine::*;

#[test]
fn test_pot_odds_basic() {
    // 50 to call into 150 already committed
    assert_relative_eq!(pot_odds(50, 150), 0.25);
}

#[test]
fn test_pot_odds_full_pot() {
    assert_relative_eq!(pot_odds(100, 200), 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_pot_odds_free_to_continue() {
    assert_eq!(pot_odds(0, 40), 0.0);
    assert_eq!(pot_odds(-5, 40), 0.0);
}

#[test]
fn test_pot_odds_in_unit_interval() {
    for cost in 1..400 {
        for pot in [0, 3, 40, 400, 800] {
            let odds = pot_odds(cost, pot);
            assert!(odds > 0.0 && odds <= 1.0, "cost {} pot {} -> {}", cost, pot, odds);
        }
    }
}

// ---------------------------------------------------------------------------
// Scary discount
// ---------------------------------------------------------------------------

#[test]
fn test_scary_discount_staircase() {
    let steps = PolicyConfig::default().scary_steps;
    assert_eq!(scary_discount(0, &steps), 0.0);
    assert_eq!(scary_discount(6, &steps), 0.0);
    assert_eq!(scary_discount(7, &steps), 0.15);
    assert_eq!(scary_discount(12, &steps), 0.15);
    assert_eq!(scary_discount(13, &steps), 0.25);
    assert_eq!(scary_discount(50, &steps), 0.25);
    assert_eq!(scary_discount(51, &steps), 0.35);
    assert_eq!(scary_discount(100, &steps), 0.35);
    assert_eq!(scary_discount(101, &steps), 0.5);
    assert_eq!(scary_discount(400, &steps), 0.5);
}

#[test]
fn test_scary_discount_monotone() {
    let steps = PolicyConfig::default().scary_steps;
    let mut previous = 0.0;
    for cost in 0..=400 {
        let discount = scary_discount(cost, &steps);
        assert!(discount >= previous);
        previous = discount;
    }
}

#[test]
fn test_scary_discount_empty_steps() {
    assert_eq!(scary_discount(300, &[]), 0.0);
}

// ---------------------------------------------------------------------------
// Sizing and match clock
// ---------------------------------------------------------------------------

#[test]
fn test_raise_target() {
    // call 10, then 40% of the 60 chip pot after calling
    assert_eq!(raise_target(2, 10, 50, 0.4), 36);
    assert_eq!(raise_target(0, 0, 40, 0.75), 30);
}

#[test]
fn test_rounds_left() {
    assert_eq!(rounds_left(1, 1000), 1000);
    assert_eq!(rounds_left(1000, 1000), 1);
    assert_eq!(rounds_left(1200, 1000), 0);
}

#[test]
fn test_bankroll_clinched() {
    assert!(bankroll_clinched(1501, 1, 1000, 1.5));
    assert!(!bankroll_clinched(1500, 1, 1000, 1.5));
    assert!(bankroll_clinched(16, 991, 1000, 1.5));
    assert!(!bankroll_clinched(-50, 1000, 1000, 1.5));
}

#[test]
fn test_decision_budget() {
    let cap = Duration::from_millis(250);
    assert_eq!(decision_budget(Duration::from_secs(10), 100, cap), Duration::from_millis(100));
    assert_eq!(decision_budget(Duration::from_secs(100), 10, cap), cap);
    assert_eq!(decision_budget(Duration::from_millis(40), 0, cap), Duration::from_millis(40));
}
