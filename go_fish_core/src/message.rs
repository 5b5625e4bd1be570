use crate::card::{Card, Rank};
use crate::state::PlayerId;
use serde::{Deserialize, Serialize};

// --- Driver -> engine ---
// What a front end can ask the engine to do on behalf of the current player.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Ask `opponent` for every card of `rank`.
    Ask { opponent: PlayerId, rank: Rank },
    /// Let the engine pick opponent and rank at random.
    Automated,
    /// Finish the turn: either pass to the next seat or end the game.
    EndTurn,
}

// --- Engine -> driver ---
// Everything the engine reports back after a command, in the order it happened.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The opponent had cards of the requested rank and handed them all over.
    CardsGiven {
        from: PlayerId,
        to: PlayerId,
        rank: Rank,
        count: usize,
    },
    /// The opponent had none. `drawn` is the card taken from the deck, or
    /// `None` when the deck was already empty.
    GoFish {
        player: PlayerId,
        asked: PlayerId,
        rank: Rank,
        drawn: Option<Card>,
    },
    /// `player` collected all four cards of `rank`.
    BookCompleted { player: PlayerId, rank: Rank },
    /// The turn moved to `player`.
    TurnPassed { player: PlayerId },
    /// Terminal event.
    GameOver { winner: PlayerId, books: usize },
}

impl GameEvent {
    /// True for a successful request, the case a "go again" driver policy looks at.
    pub fn is_catch(&self) -> bool {
        matches!(self, GameEvent::CardsGiven { .. })
    }
}
