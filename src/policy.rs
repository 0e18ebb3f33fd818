//! The decision policy: one legal action per request.
//!
//! Branches are tried in a fixed order, first match wins:
//!
//! 1. bankroll lock: the match is already won, check or fold out
//! 2. retire the max-raise exploit once a shove gets answered
//! 3. fold-prone opponent: fold to their aggression, shove otherwise
//! 4. exploit an opponent known to fold to a max raise
//! 5. facing a shove: equity-gated call against a bully, fold otherwise
//! 6. default: equity against scary-discounted pot odds
//!
//! Cross-round memory lives in [`MatchState`], which the caller owns and
//! passes into every call.

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::action::{check_or_fold, resolve, Action, ActionKind, Chips};
use crate::cards::is_pocket_pair;
use crate::config::PolicyConfig;
use crate::equity::{EquityRequest, EquitySource, MonteCarlo};
use crate::error::{BotError, BotResult};
use crate::math_engine::{
    bankroll_clinched, decision_budget, pot_odds, raise_target, rounds_left, scary_discount,
};
use crate::opponent::OpponentModel;
use crate::round::{RoundContext, RoundOutcome, Street};

/// Per-round state, cleared by [`MatchState::begin_round`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFlags {
    /// We raised to the table maximum earlier this round.
    pub max_raised: bool,
    /// The opponent has shoved this round.
    pub opponent_all_in: bool,
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub opponent: OpponentModel,
    pub flags: PolicyFlags,
    /// The opponent folded the last time we shoved; keep shoving.
    pub opponent_folds_at_max: bool,
    /// Set once a shove got called. The exploit stays off for the match.
    pub exploit_retired: bool,
    pub clinched_round: Option<u32>,
    pub rounds_won: u32,
}

impl MatchState {
    pub fn new(config: &PolicyConfig) -> Self {
        MatchState {
            opponent: OpponentModel::new(config.starting_stack),
            flags: PolicyFlags::default(),
            opponent_folds_at_max: false,
            exploit_retired: false,
            clinched_round: None,
            rounds_won: 0,
        }
    }

    pub fn begin_round(&mut self) {
        self.flags = PolicyFlags::default();
    }

    pub fn end_round(&mut self, outcome: &RoundOutcome) -> BotResult<()> {
        self.opponent
            .record_round_outcome(outcome.my_pip, outcome.opp_pip, outcome.opponent_folded)?;

        if self.flags.max_raised && !outcome.opponent_folded {
            self.retire_exploit();
        }
        if outcome.won {
            self.rounds_won += 1;
        }
        Ok(())
    }

    fn arm_exploit(&mut self) {
        if !self.exploit_retired {
            self.opponent_folds_at_max = true;
        }
    }

    fn retire_exploit(&mut self) {
        if !self.exploit_retired {
            log::info!("opponent answered a max raise, retiring the fold-at-max exploit");
        }
        self.opponent_folds_at_max = false;
        self.exploit_retired = true;
    }
}

/// Which rule produced the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    BankrollLock,
    AlreadyAllIn,
    FoldProneOpponent,
    ExploitMaxFold,
    Bully,
    PocketPairShove,
    ValueShove,
    Default,
    /// Equity could not be computed; cheapest safe action taken.
    Degraded,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Branch::BankrollLock => "bankroll lock",
            Branch::AlreadyAllIn => "already all-in",
            Branch::FoldProneOpponent => "fold-prone opponent",
            Branch::ExploitMaxFold => "exploit fold at max",
            Branch::Bully => "bully defence",
            Branch::PocketPairShove => "pocket pair shove",
            Branch::ValueShove => "value shove",
            Branch::Default => "default",
            Branch::Degraded => "degraded",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub branch: Branch,
    /// Raw equity estimate, when the branch ran one.
    pub equity: Option<f64>,
}

impl Decision {
    fn new(action: Action, branch: Branch) -> Self {
        Decision {
            action,
            branch,
            equity: None,
        }
    }

    fn with_equity(mut self, equity: f64) -> Self {
        self.equity = Some(equity);
        self
    }
}

pub struct DecisionPolicy<E = MonteCarlo> {
    config: PolicyConfig,
    equity: E,
}

impl DecisionPolicy<MonteCarlo> {
    pub fn monte_carlo(config: PolicyConfig) -> Self {
        DecisionPolicy::new(config, MonteCarlo::default())
    }
}

impl<E: EquitySource> DecisionPolicy<E> {
    pub fn new(config: PolicyConfig, equity: E) -> Self {
        DecisionPolicy { config, equity }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Picks exactly one action from `ctx.legal`.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        state: &mut MatchState,
        ctx: &RoundContext,
        rng: &mut R,
    ) -> BotResult<Decision> {
        ctx.validate()?;
        if ctx.legal.is_empty() {
            return Err(BotError::NoLegalAction);
        }

        let started = Instant::now();
        let decision = self.choose(state, ctx, rng, started)?;

        if let Action::Raise(amount) = decision.action {
            if amount >= ctx.raise_bounds.max {
                state.flags.max_raised = true;
            }
        }
        log::debug!(
            "round {} {}: {} via {} ({:?})",
            ctx.round_num,
            ctx.street,
            decision.action,
            decision.branch,
            started.elapsed()
        );
        Ok(decision)
    }

    fn choose<R: Rng + ?Sized>(
        &self,
        state: &mut MatchState,
        ctx: &RoundContext,
        rng: &mut R,
        started: Instant,
    ) -> BotResult<Decision> {
        let cfg = &self.config;
        let legal = &ctx.legal;
        let bounds = ctx.raise_bounds;

        if state.clinched_round.is_some()
            || bankroll_clinched(ctx.bankroll, ctx.round_num, cfg.total_rounds, cfg.bankroll_lock_multiplier)
        {
            if state.clinched_round.is_none() {
                log::info!("bankroll {} clinches the match at round {}", ctx.bankroll, ctx.round_num);
                state.clinched_round = Some(ctx.round_num);
            }
            return Ok(Decision::new(check_or_fold(legal, bounds)?, Branch::BankrollLock));
        }

        if ctx.my_stack == 0 {
            let preferred = if legal.contains(ActionKind::Check) {
                Action::Check
            } else {
                Action::Call
            };
            return Ok(Decision::new(resolve(preferred, legal, bounds)?, Branch::AlreadyAllIn));
        }

        // Being asked to act again after a shove means it was not folded to.
        if state.flags.max_raised && !state.exploit_retired {
            state.retire_exploit();
        }

        if state.opponent.fold_rate() > cfg.fold_rate_threshold {
            let preferred = if ctx.opponent_is_ahead() {
                Action::Fold
            } else {
                Action::Raise(bounds.max)
            };
            log::debug!("fold rate {:.2}, playing {}", state.opponent.fold_rate(), preferred);
            return Ok(Decision::new(resolve(preferred, legal, bounds)?, Branch::FoldProneOpponent));
        }

        if state.opponent_folds_at_max {
            if legal.contains(ActionKind::Raise) {
                return Ok(Decision::new(Action::Raise(bounds.max), Branch::ExploitMaxFold));
            }
            state.retire_exploit();
        }

        if state.opponent.is_all_in(ctx.opp_pip) || ctx.opp_stack == 0 {
            state.flags.opponent_all_in = true;
            return self.against_shove(state, ctx, rng, started);
        }

        self.default_line(state, ctx, rng, started)
    }

    fn against_shove<R: Rng + ?Sized>(
        &self,
        state: &MatchState,
        ctx: &RoundContext,
        rng: &mut R,
        started: Instant,
    ) -> BotResult<Decision> {
        let cfg = &self.config;
        let rate = state.opponent.all_in_rate_with_current();
        if rate <= cfg.all_in_rate_threshold {
            log::debug!("shove from a rare shover ({:.2}), folding", rate);
            return Ok(Decision::new(resolve(Action::Fold, &ctx.legal, ctx.raise_bounds)?, Branch::Bully));
        }

        let equity = match self.run_equity(ctx, rng, started) {
            Ok(equity) => equity,
            Err(err) => return self.degraded(ctx, err),
        };
        let preferred = if equity >= cfg.bully_call_equity {
            Action::Call
        } else {
            Action::Fold
        };
        log::debug!("bully rate {:.2}, equity {:.3}", rate, equity);
        Ok(Decision::new(resolve(preferred, &ctx.legal, ctx.raise_bounds)?, Branch::Bully).with_equity(equity))
    }

    fn default_line<R: Rng + ?Sized>(
        &self,
        state: &mut MatchState,
        ctx: &RoundContext,
        rng: &mut R,
        started: Instant,
    ) -> BotResult<Decision> {
        let cfg = &self.config;
        let legal = &ctx.legal;
        let bounds = ctx.raise_bounds;
        let can_raise = legal.contains(ActionKind::Raise);

        if cfg.shove_pocket_pairs && can_raise && is_pocket_pair(&ctx.hole) {
            state.arm_exploit();
            return Ok(Decision::new(Action::Raise(bounds.max), Branch::PocketPairShove));
        }

        let continue_cost = ctx.continue_cost();
        let pot_total = ctx.pot_total(cfg.starting_stack);
        let raise_to = bounds.clamp(raise_target(
            ctx.my_pip,
            continue_cost,
            pot_total,
            cfg.pot_fraction(ctx.street),
        ));

        let equity = match self.run_equity(ctx, rng, started) {
            Ok(equity) => equity,
            Err(err) => return self.degraded(ctx, err),
        };
        let strength = (equity - scary_discount(continue_cost, &cfg.scary_steps)).max(0.0);
        let odds = pot_odds(continue_cost, pot_total);
        log::debug!(
            "equity {:.3}, discounted {:.3}, pot odds {:.3}",
            equity,
            strength,
            odds
        );

        if let Some(threshold) = cfg.value_shove_equity {
            if can_raise && strength >= threshold {
                let shove = match ctx.street {
                    Street::Turn => Some(bounds.clamp(bounds.max / 2)),
                    Street::River => {
                        state.arm_exploit();
                        Some(bounds.max)
                    }
                    _ => None,
                };
                if let Some(amount) = shove {
                    return Ok(Decision::new(Action::Raise(amount), Branch::ValueShove).with_equity(equity));
                }
            }
        }

        let preferred = if strength >= odds {
            if rng.gen::<f64>() < strength && strength > cfg.aggression_floor {
                Action::Raise(raise_to)
            } else {
                Action::Call
            }
        } else if continue_cost > 0 {
            Action::Fold
        } else {
            Action::Check
        };

        Ok(Decision::new(resolve(preferred, legal, bounds)?, Branch::Default).with_equity(equity))
    }

    fn run_equity<R: Rng + ?Sized>(&self, ctx: &RoundContext, rng: &mut R, started: Instant) -> BotResult<f64> {
        let mut request = EquityRequest::new(self.config.iterations, rng.gen());
        if let Some(deadline) = self.deadline(ctx, started) {
            request = request.with_deadline(deadline);
        }
        let equity = self.equity.estimate(&ctx.hole, &ctx.board, &request)?;
        Ok(equity.value())
    }

    fn deadline(&self, ctx: &RoundContext, started: Instant) -> Option<Instant> {
        let cap = self.config.decision_time_cap();
        let budget: Duration = match ctx.time_remaining {
            Some(remaining) => decision_budget(
                remaining,
                rounds_left(ctx.round_num, self.config.total_rounds),
                cap,
            ),
            None => cap,
        };
        started.checked_add(budget)
    }

    fn degraded(&self, ctx: &RoundContext, err: BotError) -> BotResult<Decision> {
        log::warn!("equity unavailable ({}), falling back to check/fold", err);
        Ok(Decision::new(check_or_fold(&ctx.legal, ctx.raise_bounds)?, Branch::Degraded))
    }
}

/// Chips the policy would put at risk with `action`, given the context.
pub fn committed_by(action: &Action, ctx: &RoundContext) -> Chips {
    match action {
        Action::Fold | Action::Check => 0,
        Action::Call => ctx.continue_cost().min(ctx.my_stack),
        Action::Raise(amount) => (amount - ctx.my_pip).max(0),
    }
}
