use crate::card::{Card, Deck, Rank};
use crate::error::GameError;
use crate::player::Player;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

pub type PlayerId = Uuid;

/// Cards dealt to every player at the start.
pub const HAND_SIZE: usize = 5;
pub const MIN_PLAYERS: usize = 2;
/// 10 × 5 cards still fits in one deck.
pub const MAX_PLAYERS: usize = 10;

/// Serialize-only: the deck is skipped, so a serialized game cannot be restored.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    // Seat order, fixed for the lifetime of the game.
    pub(crate) players: Vec<Player>,
    // Lookup from PlayerId to seat index.
    #[serde(skip)]
    pub(crate) player_indices: HashMap<PlayerId, usize>,
    // Undealt cards stay private.
    #[serde(skip)]
    pub(crate) deck: Deck,
    pub(crate) cur_player_idx: usize,
    pub(crate) phase: GamePhase,
    pub(crate) winner: Option<PlayerId>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    Dealing,
    InProgress,
    GameOver,
}

impl GameState {
    /// Seats the players in order, shuffles a fresh deck and deals the opening hands.
    ///
    /// Each player is dealt all five cards before the next player receives any.
    pub fn new<S, R>(seats: impl IntoIterator<Item = (S, bool)>, rng: &mut R) -> Result<Self, GameError>
    where
        S: Into<String>,
        R: Rng + ?Sized,
    {
        let players: Vec<Player> = seats
            .into_iter()
            .map(|(name, is_human)| Player::new(name, is_human))
            .collect();
        Self::with_deck(players, Deck::new(rng))
    }

    pub(crate) fn with_deck(players: Vec<Player>, deck: Deck) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(GameError::InvalidPlayerCount(players.len()));
        }

        let mut state = GameState {
            player_indices: players.iter().enumerate().map(|(i, p)| (p.id(), i)).collect(),
            players,
            deck,
            cur_player_idx: 0,
            phase: GamePhase::Dealing,
            winner: None,
        };
        state.deal_opening_hands();
        state.phase = GamePhase::InProgress;
        Ok(state)
    }

    fn deal_opening_hands(&mut self) {
        for player in self.players.iter_mut() {
            for _ in 0..HAND_SIZE {
                if let Some(card) = self.deck.deal() {
                    player.add_to_hand([card]);
                }
            }
            debug!(player = player.name(), cards = player.hand().len(), "dealt opening hand");
        }
    }

    // --- Queries ---

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.player_indices.get(&id).map(|&idx| &self.players[idx])
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_player_idx(&self) -> usize {
        self.cur_player_idx
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.cur_player_idx]
    }

    /// The recorded winner once the game has been ended by `end_turn`.
    pub fn recorded_winner(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.player(id))
    }

    /// True when the deck is exhausted or nobody holds any cards.
    pub fn is_over(&self) -> bool {
        self.deck.is_empty() || self.players.iter().all(|p| !p.has_cards())
    }

    /// The player with the most books; ties go to the earliest seat.
    ///
    /// Meant for the end of the game. Before anyone has a book this is simply the first player.
    pub fn winner(&self) -> &Player {
        let mut best = &self.players[0];
        for player in &self.players[1..] {
            if player.book_count() > best.book_count() {
                best = player;
            }
        }
        best
    }

    // --- Commands ---

    /// Moves the turn to the next seat, wrapping around. Does not check for the end of the game.
    pub fn advance_turn(&mut self) {
        self.cur_player_idx = (self.cur_player_idx + 1) % self.players.len();
    }

    /// Deals the top card of the deck to a player.
    pub fn draw(&mut self, player_id: PlayerId) -> Result<Card, GameError> {
        let idx = self.index_of(player_id)?;
        let card = self.deck.deal().ok_or(GameError::EmptyDeckDraw)?;
        self.players[idx].add_to_hand([card]);
        Ok(card)
    }

    pub(crate) fn index_of(&self, id: PlayerId) -> Result<usize, GameError> {
        self.player_indices.get(&id).copied().ok_or(GameError::UnknownPlayer(id))
    }

    /// Mutable access to two different seats at once.
    pub(crate) fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Player, &mut Player) {
        assert_ne!(a, b, "pair_mut needs two distinct seats");
        if a < b {
            let (left, right) = self.players.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.players.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    /// The game as `viewer` is allowed to see it: other hands are reduced to their size.
    pub fn for_player(&self, viewer: PlayerId) -> GameView {
        GameView {
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    id: p.id(),
                    name: p.name().to_string(),
                    is_human: p.is_human(),
                    hand: (p.id() == viewer).then(|| p.hand().to_vec()),
                    hand_size: p.hand().len(),
                    books: p.books().to_vec(),
                })
                .collect(),
            deck_remaining: self.deck.len(),
            current_player: self.current_player().id(),
            phase: self.phase,
            winner: self.winner,
        }
    }
}

/// A redacted snapshot of the game for one viewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameView {
    pub players: Vec<PlayerView>,
    pub deck_remaining: usize,
    pub current_player: PlayerId,
    pub phase: GamePhase,
    pub winner: Option<PlayerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    /// Only present for the viewer's own seat.
    pub hand: Option<Vec<Card>>,
    pub hand_size: usize,
    pub books: Vec<Rank>,
}

// --- Unit tests ---
