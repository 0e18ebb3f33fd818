use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::action::Action;
use crate::cards::{Card, Suit};
use crate::policy::MatchState;

pub fn equity_bar(equity: f64, width: usize) -> String {
    let filled = ((equity.clamp(0.0, 1.0)) * width as f64) as usize;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.1}%", equity * 100.0);

    if equity >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if equity >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn board_display(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(no board)".dimmed().to_string();
    }
    cards
        .iter()
        .map(|card| match card.suit {
            Suit::Spades => card.pretty().white().to_string(),
            Suit::Hearts => card.pretty().red().to_string(),
            Suit::Diamonds => card.pretty().blue().to_string(),
            Suit::Clubs => card.pretty().green().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn styled_action(action: &Action) -> String {
    let text = action.to_string();
    match action {
        Action::Raise(_) => text.red().bold().to_string(),
        Action::Call => text.green().bold().to_string(),
        Action::Fold => text.dimmed().bold().to_string(),
        Action::Check => text.yellow().bold().to_string(),
    }
}

/// Opponent tendencies and our results so far.
pub fn match_summary(state: &MatchState, rounds_played: u32) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);

    let win_rate = if rounds_played == 0 {
        0.0
    } else {
        state.rounds_won as f64 / rounds_played as f64
    };
    let rows = [
        ("Rounds", format!("{}", state.opponent.rounds_completed())),
        ("Won", format!("{} ({:.1}%)", state.rounds_won, win_rate * 100.0)),
        ("Opp fold rate", format!("{:.1}%", state.opponent.fold_rate() * 100.0)),
        ("Opp all-in rate", format!("{:.1}%", state.opponent.all_in_rate() * 100.0)),
        (
            "Clinched",
            state
                .clinched_round
                .map(|r| format!("round {}", r))
                .unwrap_or_else(|| "no".to_string()),
        ),
    ];
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::new(metric.bold().to_string()),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
