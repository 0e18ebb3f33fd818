//! Line-oriented match driver: round state comes in on a reader, actions go
//! out on a writer. Useful for replaying hands by hand and for scripting the
//! bot in tests.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::time::Duration;

use colored::Colorize;
use rand::Rng;

use crate::action::{Chips, LegalActions, RaiseBounds};
use crate::cards::{parse_board, parse_hole, Card};
use crate::display::{board_display, match_summary, styled_action};
use crate::equity::EquitySource;
use crate::policy::{DecisionPolicy, MatchState};
use crate::round::{RoundContext, RoundOutcome, Street};

struct QuitSession;

type Prompted<T> = Result<T, QuitSession>;

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

fn prompt(message: &str, default: Option<&str>, reader: &mut dyn BufRead, writer: &mut dyn Write) -> Prompted<String> {
    if let Some(d) = default {
        write!(writer, "{} [{}]: ", message, d).ok();
    } else {
        write!(writer, "{}: ", message).ok();
    }
    writer.flush().ok();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => Err(QuitSession),
        Ok(_) => {
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("q") {
                Err(QuitSession)
            } else if trimmed.is_empty() {
                Ok(default.unwrap_or("").to_string())
            } else {
                Ok(trimmed.to_string())
            }
        }
    }
}

/// Re-prompts until `parse` accepts the answer.
fn prompt_parsed<T, F>(
    message: &str,
    default: Option<&str>,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    parse: F,
) -> Prompted<T>
where
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        let answer = prompt(message, default, reader, writer)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(msg) => {
                writeln!(writer, "  {} {}", "\u{2717}".red(), msg).ok();
            }
        }
    }
}

fn number<T: FromStr>(text: &str) -> Result<T, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("not a number: {:?}", text))
}

fn yes_no(text: &str) -> Result<bool, String> {
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => Err(format!("answer y or n, not {:?}", other)),
    }
}

fn board(text: &str) -> Result<(Street, Vec<Card>), String> {
    let cards = parse_board(text).map_err(|e| e.to_string())?;
    let street = Street::from_index(cards.len() as u8).map_err(|e| e.to_string())?;
    Ok((street, cards))
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub fn session_command<E: EquitySource, R: Rng>(policy: &DecisionPolicy<E>, rng: &mut R) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_session(policy, rng, &mut reader, &mut writer);
}

/// Plays rounds until the configured match length or a `q`. Returns the
/// final match state.
pub fn run_session<E: EquitySource, R: Rng>(
    policy: &DecisionPolicy<E>,
    rng: &mut R,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> MatchState {
    let mut state = MatchState::new(policy.config());
    writeln!(writer, "{}", "Heads-up session. Type 'q' at any prompt to stop.".cyan().bold()).ok();

    let mut played = 0;
    for round_num in 1..=policy.config().total_rounds {
        writeln!(writer, "\n{}", format!("Round #{}", round_num).bold()).ok();
        state.begin_round();
        match play_round(policy, &mut state, round_num, rng, reader, writer) {
            Ok(()) => played = round_num,
            Err(QuitSession) => break,
        }
    }

    writeln!(writer, "\n{}", match_summary(&state, played)).ok();
    state
}

fn play_round<E: EquitySource, R: Rng>(
    policy: &DecisionPolicy<E>,
    state: &mut MatchState,
    round_num: u32,
    rng: &mut R,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Prompted<()> {
    let stack = policy.config().starting_stack;
    let stack_default = stack.to_string();

    let bankroll: i64 = prompt_parsed("  Bankroll", Some("0"), reader, writer, number)?;
    let hole = prompt_parsed("  Hole cards", None, reader, writer, |s| {
        parse_hole(s).map_err(|e| e.to_string())
    })?;
    let time_remaining: Option<Duration> = prompt_parsed("  Clock seconds left (blank = none)", None, reader, writer, |s| {
        if s.is_empty() {
            Ok(None)
        } else {
            number::<f64>(s).map(|secs| Some(Duration::from_secs_f64(secs.max(0.0))))
        }
    })?;

    loop {
        let legal = prompt_parsed("  Legal actions", Some("fold,call,raise"), reader, writer, |s| {
            LegalActions::parse(s).map_err(|e| e.to_string())
        })?;
        let (street, board_cards) = prompt_parsed("  Board", None, reader, writer, board)?;
        let my_pip: Chips = prompt_parsed("  Your pip", Some("0"), reader, writer, number)?;
        let opp_pip: Chips = prompt_parsed("  Opponent pip", Some("0"), reader, writer, number)?;
        let my_stack: Chips = prompt_parsed("  Your stack", Some(stack_default.as_str()), reader, writer, number)?;
        let opp_stack: Chips = prompt_parsed("  Opponent stack", Some(stack_default.as_str()), reader, writer, number)?;
        let min_default = opp_pip.saturating_add(opp_pip.saturating_sub(my_pip).max(2)).to_string();
        let min_raise: Chips = prompt_parsed("  Min raise", Some(min_default.as_str()), reader, writer, number)?;
        let max_default = my_pip.saturating_add(my_stack).to_string();
        let max_raise: Chips = prompt_parsed("  Max raise", Some(max_default.as_str()), reader, writer, number)?;

        let ctx = RoundContext {
            street,
            hole,
            board: board_cards,
            my_pip,
            opp_pip,
            my_stack,
            opp_stack,
            legal,
            raise_bounds: RaiseBounds::new(min_raise, max_raise),
            round_num,
            bankroll,
            time_remaining,
        };

        writeln!(writer, "  {} | {}", board_display(&ctx.board), ctx.street).ok();
        match policy.decide(state, &ctx, rng) {
            Ok(decision) => {
                let equity = decision
                    .equity
                    .map(|e| format!(" equity {:.1}%", e * 100.0))
                    .unwrap_or_default();
                writeln!(
                    writer,
                    "  -> {}  ({}{})",
                    styled_action(&decision.action),
                    decision.branch,
                    equity
                )
                .ok();
            }
            Err(err) => {
                writeln!(writer, "  {} {}", "\u{2717}".red(), err).ok();
            }
        }

        if prompt_parsed("  Round over? (y/n)", Some("n"), reader, writer, yes_no)? {
            break;
        }
    }

    let won = prompt_parsed("  Did you win? (y/n)", Some("n"), reader, writer, yes_no)?;
    let my_pip: Chips = prompt_parsed("  Your total contribution", None, reader, writer, number)?;
    let opp_pip: Chips = prompt_parsed("  Opponent total contribution", None, reader, writer, number)?;
    let opponent_folded = prompt_parsed("  Did the opponent fold? (y/n)", Some("n"), reader, writer, yes_no)?;

    let outcome = RoundOutcome {
        my_pip,
        opp_pip,
        opponent_folded,
        won,
    };
    if let Err(err) = state.end_round(&outcome) {
        writeln!(writer, "  {} outcome ignored: {}", "\u{2717}".red(), err).ok();
    }
    Ok(())
}
