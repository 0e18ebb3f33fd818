//! Match-long record of how the opponent behaves.

use serde::{Deserialize, Serialize};

use crate::action::Chips;
use crate::error::{BotError, BotResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentModel {
    /// Commitment that counts as all-in.
    max_commitment: Chips,
    rounds_completed: u32,
    folds: u32,
    all_ins: u32,
}

impl OpponentModel {
    pub fn new(max_commitment: Chips) -> Self {
        OpponentModel {
            max_commitment,
            rounds_completed: 0,
            folds: 0,
            all_ins: 0,
        }
    }

    /// Folds in with the result of one finished round. Negative pips are
    /// rejected and leave the model as it was.
    pub fn record_round_outcome(
        &mut self,
        my_pip: Chips,
        opp_pip: Chips,
        opponent_folded: bool,
    ) -> BotResult<()> {
        if my_pip < 0 || opp_pip < 0 {
            return Err(BotError::InvalidValue(format!(
                "negative pip in round outcome ({}, {})",
                my_pip, opp_pip
            )));
        }

        self.rounds_completed += 1;
        if opponent_folded {
            self.folds += 1;
        }
        if self.is_all_in(opp_pip) {
            self.all_ins += 1;
        }
        Ok(())
    }

    pub fn is_all_in(&self, opp_pip: Chips) -> bool {
        opp_pip >= self.max_commitment
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    pub fn folds(&self) -> u32 {
        self.folds
    }

    pub fn all_ins(&self) -> u32 {
        self.all_ins
    }

    pub fn fold_rate(&self) -> f64 {
        ratio(self.folds, self.rounds_completed)
    }

    pub fn all_in_rate(&self) -> f64 {
        ratio(self.all_ins, self.rounds_completed)
    }

    /// All-in rate counting the round in progress as one more shove.
    pub fn all_in_rate_with_current(&self) -> f64 {
        ratio(self.all_ins + 1, self.rounds_completed + 1)
    }
}

fn ratio(count: u32, rounds: u32) -> f64 {
    if rounds == 0 {
        0.0
    } else {
        count as f64 / rounds as f64
    }
}
