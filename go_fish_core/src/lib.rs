//! # Go Fish engine
//!
//! Game state and rules for Go Fish: the deck, hands, the request / go-fish
//! exchange, book detection, turn order and the end-of-game check.
//! Nothing here knows about a user interface. A front end constructs a
//! [`GameState`], feeds it commands for the current player and renders the
//! [`GameEvent`]s and [`GameView`]s it gets back.

mod card;
mod error;
mod logic;
mod message;
mod player;
mod state;

pub use card::*;

pub use error::GameError;

pub use message::*;

pub use player::*;

pub use state::*;
