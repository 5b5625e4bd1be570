use crate::card::Rank;
use crate::error::GameError;
use crate::message::{GameEvent, PlayerCommand};
use crate::player::Player;
use crate::state::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

// --- Turn protocol ---

impl GameState {
    /// The current player asks `opponent` for every card of `rank`.
    ///
    /// On a catch the cards join the asker's hand. Otherwise the asker goes
    /// fishing and draws one card, unless the deck is already empty. Either
    /// way the asker's hand is then scanned for books. The turn does not
    /// advance; that is up to the driver via `end_turn`.
    pub fn ask(&mut self, asker: PlayerId, opponent: PlayerId, rank: Rank) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_in_progress()?;
        let asker_idx = self.index_of(asker)?;
        let opponent_idx = self.index_of(opponent)?;
        if asker_idx != self.cur_player_idx {
            return Err(GameError::NotYourTurn);
        }
        if asker_idx == opponent_idx {
            return Err(GameError::SelfRequest);
        }

        let received = {
            let (player, other) = self.pair_mut(asker_idx, opponent_idx);
            player.request_card(rank, other)
        };

        let mut events = Vec::new();
        if received.is_empty() {
            let drawn = self.deck.deal();
            if let Some(card) = drawn {
                self.players[asker_idx].add_to_hand([card]);
            }
            debug!(
                player = self.players[asker_idx].name(),
                %rank,
                drew = drawn.is_some(),
                deck = self.deck.len(),
                "go fish"
            );
            events.push(GameEvent::GoFish { player: asker, asked: opponent, rank, drawn });
        } else {
            debug!(
                player = self.players[asker_idx].name(),
                from = self.players[opponent_idx].name(),
                %rank,
                count = received.len(),
                "request caught cards"
            );
            events.push(GameEvent::CardsGiven { from: opponent, to: asker, rank, count: received.len() });
            self.players[asker_idx].add_to_hand(received);
        }

        for rank in self.players[asker_idx].check_for_books() {
            events.push(GameEvent::BookCompleted { player: asker, rank });
        }
        Ok(events)
    }

    /// Closes the current turn.
    ///
    /// If the game is over the winner is recorded and the phase becomes
    /// `GameOver`; otherwise the next seat gets the turn.
    pub fn end_turn(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_in_progress()?;

        if self.is_over() {
            let winner = self.winner();
            let (id, books) = (winner.id(), winner.book_count());
            info!(winner = winner.name(), books, "game over");
            self.winner = Some(id);
            self.phase = GamePhase::GameOver;
            return Ok(vec![GameEvent::GameOver { winner: id, books }]);
        }

        self.advance_turn();
        let next = self.current_player();
        debug!(player = next.name(), "turn passed");
        Ok(vec![GameEvent::TurnPassed { player: next.id() }])
    }

    /// Picks an opponent and a rank for the current player, both uniformly at random.
    ///
    /// The rank is drawn from the distinct ranks in the player's own hand, so an
    /// empty hand fails with `NoRankInHand`.
    pub fn choose_request<R>(&self, rng: &mut R) -> Result<(PlayerId, Rank), GameError>
    where
        R: Rng + ?Sized,
    {
        let me = self.current_player();
        let ranks = me.ranks_in_hand();
        if ranks.is_empty() {
            return Err(GameError::NoRankInHand { player: me.name().to_string() });
        }

        let opponents: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.id() != me.id())
            .map(Player::id)
            .collect();
        let opponent = *opponents
            .choose(rng)
            .ok_or(GameError::InvalidPlayerCount(self.players.len()))?;
        let rank = *ranks
            .choose(rng)
            .ok_or_else(|| GameError::NoRankInHand { player: me.name().to_string() })?;
        Ok((opponent, rank))
    }

    /// One automated action for the current player: a random request.
    pub fn computer_turn<R>(&mut self, rng: &mut R) -> Result<Vec<GameEvent>, GameError>
    where
        R: Rng + ?Sized,
    {
        self.ensure_in_progress()?;
        let asker = self.current_player().id();
        let (opponent, rank) = self.choose_request(rng)?;
        self.ask(asker, opponent, rank)
    }

    /// Applies a command on behalf of the current player.
    pub fn handle_command<R>(&mut self, command: PlayerCommand, rng: &mut R) -> Result<Vec<GameEvent>, GameError>
    where
        R: Rng + ?Sized,
    {
        match command {
            PlayerCommand::Ask { opponent, rank } => {
                let asker = self.current_player().id();
                self.ask(asker, opponent, rank)
            }
            PlayerCommand::Automated => self.computer_turn(rng),
            PlayerCommand::EndTurn => self.end_turn(),
        }
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::GameOver => Err(GameError::GameOver),
            _ => Ok(()),
        }
    }
}

// --- Unit tests ---
