use std::collections::HashSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, BotResult};

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub fn from_char(c: char) -> BotResult<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(BotError::InvalidRank(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub fn from_char(c: char) -> BotResult<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            _ => Err(BotError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "\u{2663}",
            Suit::Diamonds => "\u{2666}",
            Suit::Hearts => "\u{2665}",
            Suit::Spades => "\u{2660}",
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

/// A playing card. Ordered by rank first, then suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.to_char(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl std::str::FromStr for Card {
    type Err = BotError;

    fn from_str(s: &str) -> BotResult<Card> {
        parse_card(s)
    }
}

/// Every card of a standard deck in canonical (rank, suit) order.
pub fn full_deck() -> Vec<Card> {
    ALL_RANKS
        .iter()
        .flat_map(|&r| ALL_SUITS.iter().map(move |&s| Card::new(r, s)))
        .collect()
}

/// The cards still unseen by the caller: the full deck minus `known`.
///
/// Built in canonical order so that a seeded draw picks the same cards no
/// matter how `known` was ordered.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn excluding(known: &[Card]) -> Deck {
        let known: HashSet<Card> = known.iter().copied().collect();
        let cards = full_deck()
            .into_iter()
            .filter(|c| !known.contains(c))
            .collect();
        Deck { cards }
    }

    /// Draws `count` distinct cards uniformly at random. The deck itself is
    /// left untouched, so one deck can serve any number of trials.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> BotResult<Vec<Card>> {
        if count > self.cards.len() {
            return Err(BotError::InsufficientCards {
                requested: count,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.choose_multiple(rng, count).copied().collect())
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Draws `count` cards from the universe minus `known` without replacement.
pub fn sample<R: Rng + ?Sized>(known: &[Card], count: usize, rng: &mut R) -> BotResult<Vec<Card>> {
    Deck::excluding(known).sample(count, rng)
}

/// Fails with `InvalidHand` if any card value repeats.
pub fn ensure_distinct(cards: &[Card]) -> BotResult<()> {
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(*card) {
            return Err(BotError::InvalidHand(format!("duplicate card {}", card)));
        }
    }
    Ok(())
}

pub fn is_pocket_pair(hole: &[Card]) -> bool {
    hole.len() == 2 && hole[0].rank == hole[1].rank
}

pub fn parse_card(notation: &str) -> BotResult<Card> {
    let notation = notation.trim();
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 2 {
        return Err(BotError::InvalidCardNotation(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0])?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

/// Parses a run of card tokens: "AhKd7c", "Ah Kd 7c" and "Ah,Kd,7c" are all accepted.
pub fn parse_board(notation: &str) -> BotResult<Vec<Card>> {
    let compact: String = notation
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let chars: Vec<char> = compact.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(BotError::InvalidBoardNotation(notation.trim().to_string()));
    }
    chars
        .chunks(2)
        .map(|pair| parse_card(&pair.iter().collect::<String>()))
        .collect()
}

/// Parses exactly two distinct hole cards.
pub fn parse_hole(notation: &str) -> BotResult<[Card; 2]> {
    let cards = parse_board(notation)?;
    if cards.len() != 2 {
        return Err(BotError::InvalidHand(format!(
            "expected 2 hole cards, got {}",
            cards.len()
        )));
    }
    ensure_distinct(&cards)?;
    Ok([cards[0], cards[1]])
}
