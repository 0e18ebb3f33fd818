use std::time::Duration;

use crate::action::Chips;

/// Share of the final pot we must pay to continue.
pub fn pot_odds(continue_cost: Chips, pot_total: Chips) -> f64 {
    let denominator = pot_total + continue_cost;
    if continue_cost <= 0 || denominator <= 0 {
        return 0.0;
    }
    continue_cost as f64 / denominator as f64
}

/// Equity discount for facing a bet of `continue_cost`.
///
/// `steps` holds `(breakpoint, discount)` pairs ordered by descending
/// breakpoint; the first breakpoint the cost strictly exceeds wins.
pub fn scary_discount(continue_cost: Chips, steps: &[(Chips, f64)]) -> f64 {
    steps
        .iter()
        .find(|&&(breakpoint, _)| continue_cost > breakpoint)
        .map(|&(_, discount)| discount)
        .unwrap_or(0.0)
}

/// Raise-to amount: call first, then add `fraction` of the pot after calling.
pub fn raise_target(my_pip: Chips, continue_cost: Chips, pot_total: Chips, fraction: f64) -> Chips {
    let extra = fraction * (pot_total + continue_cost) as f64;
    my_pip + continue_cost + extra.floor() as Chips
}

/// Rounds still to be played, the current one included.
pub fn rounds_left(round_num: u32, total_rounds: u32) -> u32 {
    total_rounds.saturating_add(1).saturating_sub(round_num)
}

/// True when folding every remaining round still leaves us ahead.
///
/// Check-folding costs a blind each round; `multiplier` is the average
/// blind paid per round.
pub fn bankroll_clinched(bankroll: i64, round_num: u32, total_rounds: u32, multiplier: f64) -> bool {
    bankroll as f64 > multiplier * rounds_left(round_num, total_rounds) as f64
}

/// Even share of the remaining clock for this decision, capped at `cap`.
pub fn decision_budget(time_remaining: Duration, rounds_left: u32, cap: Duration) -> Duration {
    let share = time_remaining / rounds_left.max(1);
    share.min(cap)
}
