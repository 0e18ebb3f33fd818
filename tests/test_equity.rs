use std::cmp::Ordering;
use std::thread;
use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use pokerbot::cards::*;
use pokerbot::equity::*;
use pokerbot::error::{BotError, BotResult};
use pokerbot::hand_evaluator::{BestFive, HandComparator};

fn cards(notation: &str) -> Vec<Card> {
    parse_board(notation).unwrap()
}

fn monte_carlo() -> MonteCarlo {
    MonteCarlo::new(BestFive)
}

#[test]
fn test_pocket_aces_preflop() {
    let eq = estimate(&cards("AhAd"), &[], 1000, 7).unwrap();
    assert!(eq >= 0.75, "AA preflop equity {}", eq);
}

#[test]
fn test_estimate_in_unit_interval() {
    for (hole, board) in [("7c2d", ""), ("KsQs", "JsTs2h"), ("9h9d", "AcKcQd3s"), ("5c4c", "AsKdQh8c2d")] {
        let eq = estimate(&cards(hole), &cards(board), 300, 1).unwrap();
        assert!((0.0..=1.0).contains(&eq), "{} on {}: {}", hole, board, eq);
    }
}

#[test]
fn test_stronger_hand_scores_higher() {
    let aces = estimate(&cards("AhAd"), &[], 2000, 5).unwrap();
    let junk = estimate(&cards("7c2d"), &[], 2000, 5).unwrap();
    assert!(aces > junk);
}

#[test]
fn test_seeded_estimate_is_repeatable() {
    let hole = cards("KsQs");
    let board = cards("JsTs2h");
    let a = monte_carlo().estimate(&hole, &board, &EquityRequest::new(500, 99)).unwrap();
    let b = monte_carlo().estimate(&hole, &board, &EquityRequest::new(500, 99)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.trials, 500);
}

#[test]
fn test_board_order_does_not_matter() {
    let hole = cards("Ah7h");
    let a = estimate(&hole, &cards("Kh9c2h"), 400, 3).unwrap();
    let b = estimate(&hole, &cards("2h9cKh"), 400, 3).unwrap();
    let c = estimate(&hole, &cards("9cKh2h"), 400, 3).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn test_river_order_matters_only_through_last_card_colour() {
    let hole = cards("QcJc");
    // Both orders end on a black card, so no extra draw either way.
    let a = estimate(&hole, &cards("2s5h9dTcKs"), 400, 3).unwrap();
    let b = estimate(&hole, &cards("9d5h2sKsTc"), 400, 3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_converges_to_exact_river_equity() {
    let hole = cards("8h8d");
    let board = cards("2c7d9hJcKs");
    let exact = exact_river_equity(&hole, &board).unwrap();
    assert_eq!(exact.trials, 990);

    let sampled = monte_carlo()
        .estimate(&hole, &board, &EquityRequest::new(20_000, 11))
        .unwrap();
    assert_abs_diff_eq!(sampled.value(), exact.value(), epsilon = 0.02);
}

#[test]
fn test_exact_river_equity_nuts() {
    let exact = exact_river_equity(&cards("AsKs"), &cards("QsJsTs2d3c")).unwrap();
    assert_eq!(exact.value(), 1.0);
}

#[test]
fn test_exact_river_equity_requires_full_board() {
    assert!(matches!(
        exact_river_equity(&cards("AsKs"), &cards("QsJsTs")),
        Err(BotError::NotEnoughCards { need: 5, got: 3 })
    ));
}

// ---------------------------------------------------------------------------
// Board completion
// ---------------------------------------------------------------------------

#[test]
fn test_board_draws_completes_board() {
    assert_eq!(board_draws(&[]), 5);
    assert_eq!(board_draws(&cards("AsKdQh")), 2);
    assert_eq!(board_draws(&cards("AsKdQh2c")), 1);
}

#[test]
fn test_board_draws_red_river_draws_one() {
    assert_eq!(board_draws(&cards("AsKdQc2c3h")), 1);
    assert_eq!(board_draws(&cards("AsKcQc2c3d")), 1);
    assert_eq!(board_draws(&cards("AsKdQh2c3s")), 0);
    assert_eq!(board_draws(&cards("AsKdQh2h3c")), 0);
}

#[test]
fn test_red_river_estimate_runs() {
    let eq = estimate(&cards("AhKh"), &cards("2c7d9sJcQh"), 500, 2).unwrap();
    assert!((0.0..=1.0).contains(&eq));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_cards_rejected() {
    let err = estimate(&cards("AhAd"), &cards("AhKs2c"), 100, 0).unwrap_err();
    assert!(matches!(err, BotError::InvalidHand(_)));

    let err = estimate(&cards("AhAh"), &[], 100, 0).unwrap_err();
    assert!(matches!(err, BotError::InvalidHand(_)));
}

#[test]
fn test_bad_community_size_rejected() {
    assert!(matches!(
        estimate(&cards("AhAd"), &cards("Ks2c"), 100, 0),
        Err(BotError::InvalidHand(_))
    ));
}

#[test]
fn test_zero_iterations_rejected() {
    assert!(matches!(
        estimate(&cards("AhAd"), &[], 0, 0),
        Err(BotError::InvalidValue(_))
    ));
}

#[test]
fn test_expired_deadline_exhausts_budget() {
    let request = EquityRequest::new(100, 0).with_deadline(Instant::now());
    let err = monte_carlo()
        .estimate(&cards("AhAd"), &[], &request)
        .unwrap_err();
    assert!(matches!(err, BotError::TimeBudgetExhausted));
}

/// Always wins, but takes a millisecond to say so.
struct SlowWinner;

impl HandComparator for SlowWinner {
    fn compare(&self, _a: &[Card], _b: &[Card]) -> BotResult<Ordering> {
        thread::sleep(Duration::from_millis(1));
        Ok(Ordering::Greater)
    }
}

#[test]
fn test_deadline_keeps_partial_trials() {
    let iterations = 10_000;
    let request = EquityRequest::new(iterations, 4).with_deadline(Instant::now() + Duration::from_millis(100));
    let eq = MonteCarlo::new(SlowWinner)
        .estimate(&cards("AhAd"), &[], &request)
        .unwrap();
    assert!(eq.trials > 0 && eq.trials < iterations, "{} trials", eq.trials);
    assert_eq!(eq.value(), 1.0);
}

// ---------------------------------------------------------------------------
// Pluggable comparator
// ---------------------------------------------------------------------------

struct Coinless;

impl HandComparator for Coinless {
    fn compare(&self, _a: &[Card], _b: &[Card]) -> BotResult<Ordering> {
        Ok(Ordering::Equal)
    }
}

#[test]
fn test_custom_comparator_ties_everything() {
    let eq = MonteCarlo::new(Coinless)
        .estimate(&cards("7c2d"), &[], &EquityRequest::new(50, 0))
        .unwrap();
    assert_eq!(eq.score, 50);
    assert_eq!(eq.value(), 0.5);
}

#[test]
fn test_equity_display() {
    let eq = Equity { score: 150, trials: 100 };
    assert_eq!(eq.to_string(), "equity 75.0% over 100 trials");
    assert_eq!(Equity { score: 0, trials: 0 }.value(), 0.0);
}
