use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, Chips, LegalActions, RaiseBounds, MAX_CHIPS};
use crate::cards::{ensure_distinct, Card};
use crate::error::{BotError, BotResult};

/// Betting phase, numbered by how many community cards are showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop = 0,
    Flop = 3,
    Turn = 4,
    River = 5,
}

impl Street {
    pub fn from_index(index: u8) -> BotResult<Street> {
        match index {
            0 => Ok(Street::Preflop),
            3 => Ok(Street::Flop),
            4 => Ok(Street::Turn),
            5 => Ok(Street::River),
            other => Err(BotError::InvalidValue(format!("no street has {} board cards", other))),
        }
    }

    pub fn board_len(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "preflop"),
            Street::Flop => write!(f, "flop"),
            Street::Turn => write!(f, "turn"),
            Street::River => write!(f, "river"),
        }
    }
}

/// Everything the engine tells us when it wants an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundContext {
    pub street: Street,
    pub hole: [Card; 2],
    pub board: Vec<Card>,
    /// Chips we put in during the current street.
    pub my_pip: Chips,
    pub opp_pip: Chips,
    /// Chips left behind.
    pub my_stack: Chips,
    pub opp_stack: Chips,
    pub legal: LegalActions,
    pub raise_bounds: RaiseBounds,
    /// 1-based.
    pub round_num: u32,
    /// Net chips won or lost over the match so far.
    pub bankroll: i64,
    /// Game clock left for the whole match, when the engine reports one.
    #[serde(default)]
    pub time_remaining: Option<Duration>,
}

impl RoundContext {
    pub fn validate(&self) -> BotResult<()> {
        if self.board.len() != self.street.board_len() {
            return Err(BotError::InvalidHand(format!(
                "{} expects {} board cards, got {}",
                self.street,
                self.street.board_len(),
                self.board.len()
            )));
        }
        let known: Vec<Card> = self.hole.iter().chain(&self.board).copied().collect();
        ensure_distinct(&known)?;

        let chips = [self.my_pip, self.opp_pip, self.my_stack, self.opp_stack];
        if chips.iter().any(|&c| c < 0) {
            return Err(BotError::InvalidValue("pips and stacks cannot be negative".to_string()));
        }
        if chips.iter().any(|&c| c > MAX_CHIPS) {
            return Err(BotError::InvalidValue(format!(
                "pips and stacks cannot exceed {}",
                MAX_CHIPS
            )));
        }
        if self.legal.contains(ActionKind::Raise) {
            let RaiseBounds { min, max } = self.raise_bounds;
            if min < 0 || min > max || max > MAX_CHIPS {
                return Err(BotError::InvalidValue(format!(
                    "raise bounds [{}, {}] are malformed",
                    min, max
                )));
            }
        }
        if self.round_num == 0 {
            return Err(BotError::InvalidValue("rounds are numbered from 1".to_string()));
        }
        Ok(())
    }

    /// Chips needed to stay in the pot.
    pub fn continue_cost(&self) -> Chips {
        (self.opp_pip - self.my_pip).max(0)
    }

    /// Everything both players have committed this round.
    pub fn pot_total(&self, starting_stack: Chips) -> Chips {
        (starting_stack - self.my_stack) + (starting_stack - self.opp_stack)
    }

    pub fn opponent_is_ahead(&self) -> bool {
        self.opp_pip > self.my_pip
    }
}

/// What the engine reports when a round finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Total chips we committed over the round.
    pub my_pip: Chips,
    pub opp_pip: Chips,
    pub opponent_folded: bool,
    #[serde(default)]
    pub won: bool,
}
