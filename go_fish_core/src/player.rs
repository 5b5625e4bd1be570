use crate::card::{Card, Rank, sort_hand};
use crate::state::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;
use uuid::Uuid;

/// Cards of one rank that make a book.
pub const BOOK_SIZE: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    is_human: bool,
    // always sorted by rank value, see `add_to_hand`
    hand: Vec<Card>,
    books: Vec<Rank>,
}

impl Player {
    pub fn new(name: impl Into<String>, is_human: bool) -> Player {
        Player {
            id: Uuid::new_v4(),
            name: name.into(),
            is_human,
            hand: Vec::new(),
            books: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn books(&self) -> &[Rank] {
        &self.books
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn has_cards(&self) -> bool {
        !self.hand.is_empty()
    }

    /// Distinct ranks currently held, ascending. Does not rely on the hand being sorted.
    pub fn ranks_in_hand(&self) -> Vec<Rank> {
        let ranks: BTreeSet<Rank> = self.hand.iter().map(|c| c.rank).collect();
        ranks.into_iter().collect()
    }

    /// Takes every card of `rank` out of `opponent`'s hand and hands them back.
    ///
    /// An empty result means "go fish". The caller's own hand is left alone so
    /// the caller decides when to `add_to_hand` and `check_for_books`.
    pub fn request_card(&self, rank: Rank, opponent: &mut Player) -> Vec<Card> {
        opponent.remove_by_rank(rank)
    }

    /// Appends `cards` and re-sorts the whole hand.
    pub fn add_to_hand(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
        sort_hand(&mut self.hand);
    }

    /// Extracts all cards of `rank`, keeping the rest in order.
    pub fn remove_by_rank(&mut self, rank: Rank) -> Vec<Card> {
        let (matching, rest): (Vec<Card>, Vec<Card>) =
            self.hand.iter().partition(|c| c.rank == rank);
        self.hand = rest;
        matching
    }

    /// Moves every completed four-of-a-kind from the hand into `books`.
    ///
    /// Ranks are processed in ascending order; returns the ranks booked by this call.
    pub fn check_for_books(&mut self) -> Vec<Rank> {
        let completed: Vec<Rank> = self
            .ranks_in_hand()
            .into_iter()
            .filter(|rank| self.hand.iter().filter(|c| c.rank == *rank).count() == BOOK_SIZE)
            .collect();

        for &rank in &completed {
            self.remove_by_rank(rank);
            self.books.push(rank);
            info!(player = %self.name, %rank, books = self.books.len(), "book completed");
        }
        completed
    }

    #[cfg(test)]
    pub(crate) fn with_hand(name: &str, is_human: bool, hand: Vec<Card>) -> Player {
        let mut player = Player::new(name, is_human);
        player.add_to_hand(hand);
        player
    }

    #[cfg(test)]
    pub(crate) fn push_books(&mut self, books: &[Rank]) {
        self.books.extend_from_slice(books);
    }
}

// --- Unit tests ---
