use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BotError, BotResult};

/// Chip counts. Signed so that malformed negative input can be rejected
/// instead of wrapping.
pub type Chips = i32;

/// Largest pip, stack or raise amount accepted from outside. Keeps every
/// sum the policy forms well inside `Chips`.
pub const MAX_CHIPS: Chips = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Call,
    Check,
    Raise,
}

impl ActionKind {
    pub fn from_name(name: &str) -> BotResult<ActionKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(ActionKind::Fold),
            "call" => Ok(ActionKind::Call),
            "check" => Ok(ActionKind::Check),
            "raise" | "bet" => Ok(ActionKind::Raise),
            other => Err(BotError::InvalidValue(format!("unknown action: {}", other))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "Fold",
            ActionKind::Call => "Call",
            ActionKind::Check => "Check",
            ActionKind::Raise => "Raise",
        }
    }
}

/// One wagering decision. `Raise` carries the total amount raised to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Call,
    Check,
    Raise(Chips),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Call => ActionKind::Call,
            Action::Check => ActionKind::Check,
            Action::Raise(_) => ActionKind::Raise,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Raise(amount) => write!(f, "Raise {}", amount),
            other => write!(f, "{}", other.kind().as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseBounds {
    pub min: Chips,
    pub max: Chips,
}

impl RaiseBounds {
    pub fn new(min: Chips, max: Chips) -> Self {
        RaiseBounds { min, max }
    }

    pub fn clamp(&self, amount: Chips) -> Chips {
        amount.max(self.min).min(self.max)
    }
}

/// The set of action kinds the engine will accept right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    kinds: BTreeSet<ActionKind>,
}

impl LegalActions {
    pub fn new<I: IntoIterator<Item = ActionKind>>(kinds: I) -> Self {
        LegalActions {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Parses "fold,call,raise" or "Fold Call Raise".
    pub fn parse(list: &str) -> BotResult<Self> {
        list.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(ActionKind::from_name)
            .collect::<BotResult<BTreeSet<_>>>()
            .map(|kinds| LegalActions { kinds })
    }

    pub fn contains(&self, kind: ActionKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn permits(&self, action: &Action) -> bool {
        self.contains(action.kind())
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl fmt::Display for LegalActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(ActionKind::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}

const PREFERENCE: [ActionKind; 4] = [
    ActionKind::Raise,
    ActionKind::Call,
    ActionKind::Check,
    ActionKind::Fold,
];

const CHEAPEST: [ActionKind; 4] = [
    ActionKind::Check,
    ActionKind::Fold,
    ActionKind::Call,
    ActionKind::Raise,
];

fn materialize(kind: ActionKind, raise_to: Chips, bounds: RaiseBounds) -> Action {
    match kind {
        ActionKind::Fold => Action::Fold,
        ActionKind::Call => Action::Call,
        ActionKind::Check => Action::Check,
        ActionKind::Raise => Action::Raise(bounds.clamp(raise_to)),
    }
}

/// Turns a preferred action into a legal one.
///
/// Walks raise, call, check, fold starting at the preferred kind. If the
/// walk finds nothing (a fold when folding is not offered) the cheapest
/// legal action is taken instead. Only an empty legal set fails.
pub fn resolve(preferred: Action, legal: &LegalActions, bounds: RaiseBounds) -> BotResult<Action> {
    let raise_to = match preferred {
        Action::Raise(amount) => amount,
        _ => bounds.min,
    };

    let start = PREFERENCE
        .iter()
        .position(|&k| k == preferred.kind())
        .unwrap_or(0);

    PREFERENCE[start..]
        .iter()
        .chain(CHEAPEST.iter())
        .find(|&&kind| legal.contains(kind))
        .map(|&kind| materialize(kind, raise_to, bounds))
        .ok_or(BotError::NoLegalAction)
}

/// Check when free, otherwise fold.
pub fn check_or_fold(legal: &LegalActions, bounds: RaiseBounds) -> BotResult<Action> {
    let preferred = if legal.contains(ActionKind::Check) {
        Action::Check
    } else {
        Action::Fold
    };
    resolve(preferred, legal, bounds)
}
