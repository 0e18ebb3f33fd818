use std::cmp::Ordering;
use std::fmt;
use std::time::Instant;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::cards::{ensure_distinct, Card, Deck};
use crate::error::{BotError, BotResult};
use crate::hand_evaluator::{BestFive, HandComparator};

const OPPONENT_HOLE: usize = 2;
const FULL_BOARD: usize = 5;

/// Aggregate of a batch of showdown trials. Each trial scores 2 for a win,
/// 1 for a tie and 0 for a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equity {
    pub score: u64,
    pub trials: usize,
}

impl Equity {
    /// Win probability with ties counted as half a win.
    pub fn value(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.score as f64 / (2.0 * self.trials as f64)
    }
}

impl fmt::Display for Equity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "equity {:.1}% over {} trials", self.value() * 100.0, self.trials)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EquityRequest {
    pub iterations: usize,
    pub seed: u64,
    /// No new trial starts once this instant has passed.
    pub deadline: Option<Instant>,
}

impl EquityRequest {
    pub fn new(iterations: usize, seed: u64) -> Self {
        EquityRequest {
            iterations,
            seed,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Anything able to put a number on our chances at showdown.
pub trait EquitySource {
    fn estimate(&self, hole: &[Card], community: &[Card], request: &EquityRequest) -> BotResult<Equity>;
}

/// Monte Carlo estimator: every trial deals the opponent two unseen cards
/// and completes the board, then settles the showdown with `comparator`.
#[derive(Debug, Clone, Default)]
pub struct MonteCarlo<C = BestFive> {
    comparator: C,
}

impl<C: HandComparator> MonteCarlo<C> {
    pub fn new(comparator: C) -> Self {
        MonteCarlo { comparator }
    }

    fn run_trial(
        &self,
        deck: &Deck,
        hole: &[Card],
        community: &[Card],
        board_draws: usize,
        rng: &mut StdRng,
    ) -> BotResult<u64> {
        let draw = deck.sample(OPPONENT_HOLE + board_draws, rng)?;
        let (opp_hole, runout) = draw.split_at(OPPONENT_HOLE);

        let ours: Vec<Card> = hole.iter().chain(community).chain(runout).copied().collect();
        let theirs: Vec<Card> = opp_hole.iter().chain(community).chain(runout).copied().collect();

        Ok(match self.comparator.compare(&ours, &theirs)? {
            Ordering::Greater => 2,
            Ordering::Equal => 1,
            Ordering::Less => 0,
        })
    }
}

/// Board cards to deal per trial. Before the river this completes the
/// board. On the river a red last card draws one extra card, a black one
/// draws none.
pub fn board_draws(community: &[Card]) -> usize {
    match community.last() {
        Some(last) if community.len() >= FULL_BOARD => usize::from(last.suit.is_red()),
        _ => FULL_BOARD - community.len(),
    }
}

fn validate(hole: &[Card], community: &[Card]) -> BotResult<()> {
    if hole.len() != 2 {
        return Err(BotError::InvalidHand(format!(
            "expected 2 hole cards, got {}",
            hole.len()
        )));
    }
    if !matches!(community.len(), 0 | 3 | 4 | 5) {
        return Err(BotError::InvalidHand(format!(
            "community must hold 0, 3, 4 or 5 cards, got {}",
            community.len()
        )));
    }
    let known: Vec<Card> = hole.iter().chain(community).copied().collect();
    ensure_distinct(&known)
}

impl<C: HandComparator> EquitySource for MonteCarlo<C> {
    fn estimate(&self, hole: &[Card], community: &[Card], request: &EquityRequest) -> BotResult<Equity> {
        validate(hole, community)?;
        if request.iterations == 0 {
            return Err(BotError::InvalidValue("iterations must be positive".to_string()));
        }

        let known: Vec<Card> = hole.iter().chain(community).copied().collect();
        let deck = Deck::excluding(&known);
        let draws = board_draws(community);

        // Trial i seeds its own generator, so the outcome does not depend on
        // how rayon schedules the work.
        let outcomes: Vec<Option<u64>> = (0..request.iterations)
            .into_par_iter()
            .map(|i| {
                if request.deadline.is_some_and(|d| Instant::now() >= d) {
                    return Ok(None);
                }
                let mut rng = StdRng::seed_from_u64(request.seed.wrapping_add(i as u64));
                self.run_trial(&deck, hole, community, draws, &mut rng).map(Some)
            })
            .collect::<BotResult<Vec<_>>>()?;

        let (score, trials) = outcomes
            .iter()
            .flatten()
            .fold((0u64, 0usize), |(s, t), &points| (s + points, t + 1));

        if trials == 0 {
            return Err(BotError::TimeBudgetExhausted);
        }
        if trials < request.iterations {
            log::debug!(
                "deadline cut simulation short: {}/{} trials",
                trials,
                request.iterations
            );
        }

        Ok(Equity { score, trials })
    }
}

/// Seeded estimate with the default evaluator.
pub fn estimate(hole: &[Card], community: &[Card], iterations: usize, seed: u64) -> BotResult<f64> {
    MonteCarlo::<BestFive>::default()
        .estimate(hole, community, &EquityRequest::new(iterations, seed))
        .map(|e| e.value())
}

/// Exact river equity against every possible opponent holding.
pub fn exact_river_equity(hole: &[Card], board: &[Card]) -> BotResult<Equity> {
    validate(hole, board)?;
    if board.len() != FULL_BOARD {
        return Err(BotError::NotEnoughCards {
            need: FULL_BOARD,
            got: board.len(),
        });
    }

    let ours: Vec<Card> = hole.iter().chain(board).copied().collect();
    let deck = Deck::excluding(&ours);
    let comparator = BestFive;

    let pairs: Vec<Vec<&Card>> = deck.cards().iter().combinations(OPPONENT_HOLE).collect();
    let scores: Vec<u64> = pairs
        .par_iter()
        .map(|pair| {
            let theirs: Vec<Card> = pair.iter().map(|c| **c).chain(board.iter().copied()).collect();
            comparator.compare(&ours, &theirs).map(|ord| match ord {
                Ordering::Greater => 2,
                Ordering::Equal => 1,
                Ordering::Less => 0,
            })
        })
        .collect::<BotResult<Vec<_>>>()?;

    Ok(Equity {
        score: scores.iter().sum(),
        trials: scores.len(),
    })
}
