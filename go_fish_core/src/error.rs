use crate::state::PlayerId;
use thiserror::Error;

/// Every recoverable failure the engine reports.
///
/// None of these are fatal: the driver checks before calling where it can and
/// otherwise reports the error and retries or skips the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("`{0}` is not a card rank (expected 2-10, J, Q, K or A)")]
    InvalidRank(String),
    #[error("`{0}` is not a card suit (expected Hearts, Diamonds, Clubs or Spades)")]
    InvalidSuit(String),
    #[error("the deck is empty")]
    EmptyDeckDraw,
    #[error("{player} has no cards to ask for")]
    NoRankInHand { player: String },
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("a player cannot ask themselves for cards")]
    SelfRequest,
    #[error("the game is already over")]
    GameOver,
    #[error("a game needs between 2 and 10 players, got {0}")]
    InvalidPlayerCount(usize),
}
