//! Tunable constants for the decision policy.
//!
//! Every bot variant we play is one `PolicyConfig`. Defaults reproduce the
//! tournament build; a JSON file can override any subset of fields.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::action::{Chips, MAX_CHIPS};
use crate::error::{BotError, BotResult};
use crate::round::Street;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub total_rounds: u32,
    /// Chips each player starts a round with. Reaching it is all-in.
    pub starting_stack: Chips,
    pub bankroll_lock_multiplier: f64,
    pub fold_rate_threshold: f64,
    pub all_in_rate_threshold: f64,
    /// Equity needed to call a known bully's shove.
    pub bully_call_equity: f64,
    /// `(breakpoint, discount)`, descending breakpoints.
    pub scary_steps: Vec<(Chips, f64)>,
    /// Pot share added on top of a call, preflop and flop.
    pub early_pot_fraction: f64,
    /// Same for turn and river.
    pub late_pot_fraction: f64,
    pub iterations: usize,
    /// Raise instead of call only above this equity.
    pub aggression_floor: f64,
    pub value_shove_equity: Option<f64>,
    /// Shove every pocket pair whenever a raise is legal.
    pub shove_pocket_pairs: bool,
    pub decision_time_cap_ms: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            total_rounds: 1000,
            starting_stack: 400,
            bankroll_lock_multiplier: 1.5,
            fold_rate_threshold: 0.5,
            all_in_rate_threshold: 0.40,
            bully_call_equity: 0.5,
            scary_steps: vec![(100, 0.5), (50, 0.35), (12, 0.25), (6, 0.15)],
            early_pot_fraction: 0.4,
            late_pot_fraction: 0.75,
            iterations: 200,
            aggression_floor: 0.5,
            value_shove_equity: Some(0.9),
            shove_pocket_pairs: false,
            decision_time_cap_ms: 250,
        }
    }
}

impl PolicyConfig {
    pub fn from_json_str(json: &str) -> BotResult<Self> {
        let config: PolicyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> BotResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> BotResult<()> {
        let probabilities = [
            ("fold_rate_threshold", self.fold_rate_threshold),
            ("all_in_rate_threshold", self.all_in_rate_threshold),
            ("bully_call_equity", self.bully_call_equity),
            ("aggression_floor", self.aggression_floor),
            ("value_shove_equity", self.value_shove_equity.unwrap_or(0.0)),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(BotError::Config(format!("{} must lie in [0, 1], got {}", name, value)));
            }
        }
        if self.iterations == 0 {
            return Err(BotError::Config("iterations must be positive".to_string()));
        }
        if self.total_rounds == 0 || self.starting_stack <= 0 {
            return Err(BotError::Config(
                "total_rounds and starting_stack must be positive".to_string(),
            ));
        }
        if self.starting_stack > MAX_CHIPS {
            return Err(BotError::Config(format!("starting_stack cannot exceed {}", MAX_CHIPS)));
        }
        if self.bankroll_lock_multiplier < 0.0 {
            return Err(BotError::Config("bankroll_lock_multiplier cannot be negative".to_string()));
        }
        if self.scary_steps.windows(2).any(|w| w[0].0 <= w[1].0) {
            return Err(BotError::Config(
                "scary_steps breakpoints must be strictly descending".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pot_fraction(&self, street: Street) -> f64 {
        match street {
            Street::Preflop | Street::Flop => self.early_pot_fraction,
            Street::Turn | Street::River => self.late_pot_fraction,
        }
    }

    pub fn decision_time_cap(&self) -> Duration {
        Duration::from_millis(self.decision_time_cap_ms)
    }
}
