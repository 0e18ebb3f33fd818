use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;

use crate::cards::Card;
use crate::error::{BotError, BotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandCategory::HighCard => write!(f, "High Card"),
            HandCategory::OnePair => write!(f, "One Pair"),
            HandCategory::TwoPair => write!(f, "Two Pair"),
            HandCategory::ThreeOfAKind => write!(f, "Three of a Kind"),
            HandCategory::Straight => write!(f, "Straight"),
            HandCategory::Flush => write!(f, "Flush"),
            HandCategory::FullHouse => write!(f, "Full House"),
            HandCategory::FourOfAKind => write!(f, "Four of a Kind"),
            HandCategory::StraightFlush => write!(f, "Straight Flush"),
        }
    }
}

/// Strength of the best five-card hand. Compares by category, then by the
/// tiebreak values in significance order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandValue {
    pub category: HandCategory,
    pub tiebreak: Vec<u8>,
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

/// Total order over showdown hands. Implementations must be pure: the same
/// pair of hands always compares the same way, with no shared state.
pub trait HandComparator: Sync {
    fn compare(&self, a: &[Card], b: &[Card]) -> BotResult<Ordering>;
}

/// Picks the best five cards out of whatever is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFive;

impl HandComparator for BestFive {
    fn compare(&self, a: &[Card], b: &[Card]) -> BotResult<Ordering> {
        Ok(evaluate(a)?.cmp(&evaluate(b)?))
    }
}

fn straight_high(values: &[u8]) -> Option<u8> {
    // values are sorted descending and distinct
    if values.len() != 5 {
        return None;
    }
    if values[0] - values[4] == 4 {
        return Some(values[0]);
    }
    if values == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

fn evaluate_five(cards: &[Card; 5]) -> HandValue {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.value() as usize] += 1;
    }

    // (count, value) groups, biggest group first, then highest value
    let groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (counts[v as usize], v))
        .sorted_by(|a, b| b.cmp(a))
        .collect();
    let by_group: Vec<u8> = groups.iter().map(|&(_, v)| v).collect();

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = if groups.len() == 5 {
        straight_high(&by_group)
    } else {
        None
    };

    let (category, tiebreak) = match (groups[0].0, groups.get(1).map(|g| g.0)) {
        _ if flush && straight.is_some() => {
            (HandCategory::StraightFlush, straight.into_iter().collect())
        }
        (4, _) => (HandCategory::FourOfAKind, by_group),
        (3, Some(2)) => (HandCategory::FullHouse, by_group),
        _ if flush => (HandCategory::Flush, by_group),
        _ if straight.is_some() => (HandCategory::Straight, straight.into_iter().collect()),
        (3, _) => (HandCategory::ThreeOfAKind, by_group),
        (2, Some(2)) => (HandCategory::TwoPair, by_group),
        (2, _) => (HandCategory::OnePair, by_group),
        _ => (HandCategory::HighCard, by_group),
    };

    HandValue { category, tiebreak }
}

/// Value of the best five-card hand among `cards` (five or more).
pub fn evaluate(cards: &[Card]) -> BotResult<HandValue> {
    if cards.len() < 5 {
        return Err(BotError::NotEnoughCards {
            need: 5,
            got: cards.len(),
        });
    }

    cards
        .iter()
        .combinations(5)
        .map(|combo| evaluate_five(&[*combo[0], *combo[1], *combo[2], *combo[3], *combo[4]]))
        .max()
        .ok_or(BotError::NotEnoughCards {
            need: 5,
            got: cards.len(),
        })
}

pub fn evaluate_hand(hole_cards: &[Card], board: &[Card]) -> BotResult<HandValue> {
    let all_cards: Vec<Card> = hole_cards.iter().chain(board).copied().collect();
    evaluate(&all_cards)
}
