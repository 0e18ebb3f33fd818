use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::action::{Chips, LegalActions, RaiseBounds};
use crate::cards::{parse_board, parse_hole, Card};
use crate::config::PolicyConfig;
use crate::display::{board_display, equity_bar, print_error, styled_action};
use crate::equity::{exact_river_equity, EquityRequest, EquitySource, MonteCarlo};
use crate::error::BotResult;
use crate::hand_evaluator::{evaluate_hand, BestFive};
use crate::policy::{committed_by, DecisionPolicy, MatchState};
use crate::round::{RoundContext, Street};
use crate::session::session_command;

#[derive(Parser)]
#[command(name = "pokerbot", version = "1.0.0", about = "Heads-up no-limit decision engine: equity, single decisions and interactive matches.")]
struct Cli {
    /// Log branch decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// JSON file overriding policy constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate win probability against a random hand
    Equity {
        /// Your hole cards (e.g., AhAd)
        hole: String,
        /// Board cards (e.g., As7d2c)
        #[arg(short, long)]
        board: Option<String>,
        /// Number of Monte Carlo trials
        #[arg(short = 'n', long, default_value = "1000")]
        iterations: usize,
        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Enumerate every opponent holding (river only)
        #[arg(long)]
        exact: bool,
    },
    /// Ask the policy for one action
    Decide {
        /// Your hole cards
        #[arg(long)]
        hole: String,
        /// Board cards, omit preflop
        #[arg(short, long)]
        board: Option<String>,
        /// Legal actions, comma separated (fold,call,check,raise)
        #[arg(long, default_value = "fold,call,raise")]
        legal: String,
        #[arg(long, default_value = "1")]
        my_pip: Chips,
        #[arg(long, default_value = "2")]
        opp_pip: Chips,
        #[arg(long, default_value = "399")]
        my_stack: Chips,
        #[arg(long, default_value = "398")]
        opp_stack: Chips,
        #[arg(long, default_value = "4")]
        min_raise: Chips,
        #[arg(long, default_value = "400")]
        max_raise: Chips,
        #[arg(long, default_value = "1")]
        round: u32,
        #[arg(long, default_value = "0")]
        bankroll: i64,
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Play a match by typing in the engine's round state
    Session {
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Commands::Equity {
            hole,
            board,
            iterations,
            seed,
            exact,
        } => cmd_equity(&hole, board.as_deref(), iterations, seed, exact),
        Commands::Decide {
            hole,
            board,
            legal,
            my_pip,
            opp_pip,
            my_stack,
            opp_stack,
            min_raise,
            max_raise,
            round,
            bankroll,
            seed,
        } => parse_context(&hole, board.as_deref(), &legal)
            .map(|(hole, board, street, legal)| RoundContext {
                street,
                hole,
                board,
                my_pip,
                opp_pip,
                my_stack,
                opp_stack,
                legal,
                raise_bounds: RaiseBounds::new(min_raise, max_raise),
                round_num: round,
                bankroll,
                time_remaining: None,
            })
            .and_then(|ctx| cmd_decide(config, &ctx, seed)),
        Commands::Session { seed } => {
            let policy = DecisionPolicy::monte_carlo(config);
            session_command(&policy, &mut StdRng::seed_from_u64(seed));
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> BotResult<PolicyConfig> {
    match path {
        Some(path) => {
            log::info!("loading policy config from {}", path.display());
            PolicyConfig::from_json_file(path)
        }
        None => Ok(PolicyConfig::default()),
    }
}

type ParsedCards = ([Card; 2], Vec<Card>, Street, LegalActions);

fn parse_context(hole: &str, board: Option<&str>, legal: &str) -> BotResult<ParsedCards> {
    let hole = parse_hole(hole)?;
    let board = match board {
        Some(b) => parse_board(b)?,
        None => Vec::new(),
    };
    let street = Street::from_index(board.len() as u8)?;
    let legal = LegalActions::parse(legal)?;
    Ok((hole, board, street, legal))
}

fn cmd_equity(hole: &str, board: Option<&str>, iterations: usize, seed: u64, exact: bool) -> BotResult<()> {
    let hole = parse_hole(hole)?;
    let board = match board {
        Some(b) => parse_board(b)?,
        None => Vec::new(),
    };

    println!();
    println!(
        "  {} on {}",
        board_display(&hole),
        board_display(&board)
    );

    let equity = if exact {
        println!("  Enumerating every opponent holding...\n");
        exact_river_equity(&hole, &board)?
    } else {
        println!("  Running {} trials...\n", format!("{}", iterations).bold());
        MonteCarlo::new(BestFive).estimate(&hole, &board, &EquityRequest::new(iterations, seed))?
    };

    println!("  Hero: {}", equity_bar(equity.value(), 30));
    if board.len() >= 3 {
        println!("  Made hand: {}", evaluate_hand(&hole, &board)?);
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new(""), Cell::new("")]);
    table.add_row(vec![
        Cell::new("Equity".bold().to_string()),
        Cell::new(format!("{:.1}%", equity.value() * 100.0).bold().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Trials".bold().to_string()),
        Cell::new(format!("{}", equity.trials)),
    ]);
    println!("{}", table);
    println!();
    Ok(())
}

fn cmd_decide(config: PolicyConfig, ctx: &RoundContext, seed: u64) -> BotResult<()> {
    let mut state = MatchState::new(&config);
    let policy = DecisionPolicy::monte_carlo(config);
    let mut rng = StdRng::seed_from_u64(seed);

    let decision = policy.decide(&mut state, ctx, &mut rng)?;

    println!();
    println!(
        "  {} on {} ({}), legal: {}",
        board_display(&ctx.hole),
        board_display(&ctx.board),
        ctx.street,
        ctx.legal
    );
    println!(
        "  {}  via {}, risking {} chips",
        styled_action(&decision.action),
        decision.branch.to_string().dimmed(),
        committed_by(&decision.action, ctx)
    );
    if let Some(equity) = decision.equity {
        println!("  Equity: {}", equity_bar(equity, 30));
    }
    println!();
    Ok(())
}
