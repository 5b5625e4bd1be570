use crate::error::GameError;
use rand::Rng;
use rand::prelude::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// --- Core data types ---

/// Suit
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

/// Rank
/// The derived `Ord` runs 2 < 3 < ... < K < A and is only used to order hands.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// A single playing card.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }

    /// One-character display glyph.
    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
    ];

    /// Ordering value in `2..=14`, Ace high.
    pub fn value(self) -> u8 {
        self as u8 + 2
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Builds a card from free-text symbols such as `("10", "Hearts")` or `("q", "♠")`.
    pub fn from_symbols(rank: &str, suit: &str) -> Result<Card, GameError> {
        Ok(Card::new(rank.parse()?, suit.parse()?))
    }

    pub fn rank_value(&self) -> u8 {
        self.rank.value()
    }

    pub fn suit_symbol(&self) -> char {
        self.suit.symbol()
    }

    /// Human-readable `"<rank> of <suit>"`.
    pub fn display_string(&self) -> String {
        format!("{} of {}", self.rank, self.suit)
    }

    /// Compact form used when laying out a hand, e.g. `10♥`.
    pub fn short(&self) -> String {
        format!("{}{}", self.rank, self.suit_symbol())
    }
}

// --- Display and parsing ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

impl FromStr for Rank {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_lowercase().as_str() {
            "2" | "two" => Rank::Two,
            "3" | "three" => Rank::Three,
            "4" | "four" => Rank::Four,
            "5" | "five" => Rank::Five,
            "6" | "six" => Rank::Six,
            "7" | "seven" => Rank::Seven,
            "8" | "eight" => Rank::Eight,
            "9" | "nine" => Rank::Nine,
            "10" | "t" | "ten" => Rank::Ten,
            "j" | "jack" => Rank::Jack,
            "q" | "queen" => Rank::Queen,
            "k" | "king" => Rank::King,
            "a" | "ace" => Rank::Ace,
            _ => return Err(GameError::InvalidRank(s.to_string())),
        };
        Ok(rank)
    }
}

impl FromStr for Suit {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suit = match s.trim().to_lowercase().as_str() {
            "h" | "heart" | "hearts" | "♥" => Suit::Hearts,
            "d" | "diamond" | "diamonds" | "♦" => Suit::Diamonds,
            "c" | "club" | "clubs" | "♣" => Suit::Clubs,
            "s" | "spade" | "spades" | "♠" => Suit::Spades,
            _ => return Err(GameError::InvalidSuit(s.to_string())),
        };
        Ok(suit)
    }
}

// --- Deck ---

/// The undealt cards. Dealing pops from the end, so the last card is the top of the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the 52 cards suit by suit and shuffles them with `rng`.
    pub fn new<R>(rng: &mut R) -> Deck
    where
        R: Rng + ?Sized,
    {
        let mut cards = Vec::with_capacity(52);
        for &suit in &Suit::ALL {
            for &rank in &Rank::ALL {
                cards.push(Card { rank, suit });
            }
        }
        cards.shuffle(rng);
        debug!(cards = cards.len(), "shuffled a fresh deck");
        Deck { cards }
    }

    /// A deck in exactly the given order, top card last.
    #[cfg(test)]
    pub(crate) fn from_cards(cards: Vec<Card>) -> Deck {
        Deck { cards }
    }

    /// Removes the top card, or `None` once the deck is exhausted.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

// --- Hand ordering ---

/// Stable ascending sort by rank value; equal ranks keep their insertion order.
pub fn sort_hand(hand: &mut [Card]) {
    hand.sort_by_key(Card::rank_value);
}

// --- Unit tests ---
