use anyhow::{Context, Result};
use crossterm::style::Stylize;
use go_fish_core::{Card, GameEvent, GameState, GameView, PlayerId};
use serde::Serialize;
use std::io::{self, Stderr, Stdout, Write};

/// Writes what happens at the table, as text or as JSON lines.
///
/// In JSON mode `out` carries nothing but JSON lines; prompts and messages
/// meant for the person at the keyboard go to `err` instead.
pub struct Renderer<O = Stdout, E = Stderr> {
    json: bool,
    out: O,
    err: E,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Renderer::with_writers(json, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Renderer<O, E> {
    pub fn with_writers(json: bool, out: O, err: E) -> Self {
        Renderer { json, out, err }
    }

    pub fn events(&mut self, game: &GameState, events: &[GameEvent]) -> Result<()> {
        for event in events {
            if self.json {
                self.print_json(event)?;
            } else {
                writeln!(self.out, "{}", describe(game, event))?;
            }
        }
        Ok(())
    }

    /// Hand and books of a human seat. JSON mode prints that seat's `GameView`.
    pub fn hand(&mut self, game: &GameState, player: PlayerId) -> Result<()> {
        if self.json {
            return self.print_json(&game.for_player(player));
        }
        if let Some(p) = game.player(player) {
            let books = p.books().iter().map(|r| r.to_string()).collect::<Vec<_>>().join(", ");
            writeln!(self.out, "Your hand:  {}", format_hand(p.hand()))?;
            writeln!(self.out, "Your books: {}", books)?;
        }
        Ok(())
    }

    pub fn view(&mut self, view: &GameView) -> Result<()> {
        if self.json {
            return self.print_json(view);
        }
        writeln!(self.out, "Deck: {} card(s) left", view.deck_remaining)?;
        for (seat, p) in view.players.iter().enumerate() {
            let marker = if p.id == view.current_player { "*" } else { " " };
            let books = p.books.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(" ");
            writeln!(
                self.out,
                "{marker} {}. {:<12} {:>2} card(s)  books: [{}]",
                seat + 1,
                p.name,
                p.hand_size,
                books
            )?;
        }
        Ok(())
    }

    /// Table chatter; dropped in JSON mode.
    pub fn note(&mut self, message: &str) -> Result<()> {
        if !self.json {
            writeln!(self.out, "{message}")?;
        }
        Ok(())
    }

    /// Help and error text for the human. Always shown, on stderr in JSON mode.
    pub fn message(&mut self, message: &str) -> Result<()> {
        if self.json {
            writeln!(self.err, "{message}")?;
        } else {
            writeln!(self.out, "{message}")?;
        }
        Ok(())
    }

    /// Input prompt without a trailing newline, flushed.
    pub fn prompt(&mut self, prompt: &str) -> Result<()> {
        if self.json {
            write!(self.err, "{prompt}")?;
            self.err.flush().context("flushing the prompt")?;
        } else {
            write!(self.out, "{prompt}")?;
            self.out.flush().context("flushing the prompt")?;
        }
        Ok(())
    }

    fn print_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let line = serde_json::to_string(value).context("serializing game output to JSON")?;
        writeln!(self.out, "{line}")?;
        Ok(())
    }
}

fn name(game: &GameState, id: PlayerId) -> &str {
    game.player(id).map_or("unknown player", |p| p.name())
}

fn format_hand(hand: &[Card]) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.iter()
        .map(|card| {
            let short = card.short();
            if card.suit.is_red() {
                short.red().to_string()
            } else {
                short.bold().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line of table talk for an event.
pub fn describe(game: &GameState, event: &GameEvent) -> String {
    match event {
        GameEvent::CardsGiven { from, to, rank, count } => format!(
            "{} asked {} for {}(s) and received {} card(s).",
            name(game, *to),
            name(game, *from),
            rank,
            count
        ),
        GameEvent::GoFish { player, asked, rank, drawn } => {
            let who = name(game, *player);
            let asked = name(game, *asked);
            let human = game.player(*player).is_some_and(|p| p.is_human());
            match drawn {
                Some(card) if human => {
                    format!("{asked} has no {rank}s. Go Fish! You drew the {card}.")
                }
                Some(_) => format!("{who} asked {asked} for {rank}s. Go Fish! {who} went fishing."),
                None => format!("{who} asked {asked} for {rank}s. Go Fish! The deck is empty."),
            }
        }
        GameEvent::BookCompleted { player, rank } => {
            format!("{} completed a book of {}s!", name(game, *player), rank)
        }
        GameEvent::TurnPassed { player } => format!("--- {}'s turn ---", name(game, *player)),
        GameEvent::GameOver { winner, books } => {
            format!("Game Over! {} wins with {} books!", name(game, *winner), books)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use go_fish_core::{Rank, Suit};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::input::HELP;

    fn table() -> GameState {
        GameState::new([("You", true), ("Bot", false)], &mut StdRng::seed_from_u64(4)).unwrap()
    }

    #[test]
    fn test_describe_events() {
        let game = table();
        let (you, bot) = (game.players()[0].id(), game.players()[1].id());

        assert_eq!(
            describe(&game, &GameEvent::CardsGiven { from: bot, to: you, rank: Rank::Seven, count: 2 }),
            "You asked Bot for 7(s) and received 2 card(s)."
        );
        assert_eq!(
            describe(
                &game,
                &GameEvent::GoFish {
                    player: you,
                    asked: bot,
                    rank: Rank::Jack,
                    drawn: Some(Card::new(Rank::Two, Suit::Clubs)),
                }
            ),
            "Bot has no Js. Go Fish! You drew the 2 of Clubs."
        );
        assert_eq!(
            describe(&game, &GameEvent::GoFish { player: bot, asked: you, rank: Rank::Ace, drawn: None }),
            "Bot asked You for As. Go Fish! The deck is empty."
        );
        assert_eq!(
            describe(&game, &GameEvent::GameOver { winner: bot, books: 3 }),
            "Game Over! Bot wins with 3 books!"
        );
        assert_eq!(describe(&game, &GameEvent::TurnPassed { player: bot }), "--- Bot's turn ---");
    }

    #[test]
    fn test_format_hand_lists_every_card() {
        assert_eq!(format_hand(&[]), "(empty)");
        let hand = [Card::new(Rank::Ten, Suit::Hearts), Card::new(Rank::King, Suit::Spades)];
        let text = format_hand(&hand);
        assert!(text.contains("10♥"));
        assert!(text.contains("K♠"));
    }

    type Captured = Renderer<Vec<u8>, Vec<u8>>;

    fn captured(json: bool) -> Captured {
        Renderer::with_writers(json, Vec::new(), Vec::new())
    }

    fn lines(bytes: &[u8]) -> Vec<String> {
        String::from_utf8(bytes.to_vec()).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_json_mode_keeps_stdout_machine_readable() {
        let mut game = table();
        let you = game.players()[0].id();
        let bot = game.players()[1].id();
        let mut r = captured(true);

        r.note("--- Go Fish ---").unwrap();
        r.hand(&game, you).unwrap();
        r.prompt("You, ask for a card rank: ").unwrap();
        r.message(HELP).unwrap();
        r.message("there is no seat 9").unwrap();
        let events = game.ask(you, bot, Rank::Ace).unwrap();
        r.events(&game, &events).unwrap();

        let out = lines(&r.out);
        assert_eq!(out.len(), 1 + events.len());
        for line in &out {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }

        let err = String::from_utf8(r.err.clone()).unwrap();
        assert!(err.starts_with("You, ask for a card rank: "));
        assert!(err.contains(HELP));
        assert!(err.contains("there is no seat 9"));
    }

    #[test]
    fn test_json_hand_is_the_viewers_view() {
        let game = table();
        let you = game.players()[0].id();
        let mut r = captured(true);
        r.hand(&game, you).unwrap();

        let view: GameView = serde_json::from_str(&lines(&r.out)[0]).unwrap();
        assert_eq!(view, game.for_player(you));
        assert_eq!(view.players[0].hand.as_deref(), Some(game.players()[0].hand()));
        assert_eq!(view.players[1].hand, None);
    }

    #[test]
    fn test_text_mode_writes_everything_to_stdout() {
        let game = table();
        let you = game.players()[0].id();
        let mut r = captured(false);

        r.prompt("You, ask for a card rank: ").unwrap();
        r.message("there is no seat 9").unwrap();
        r.note("Leaving the table.").unwrap();
        r.hand(&game, you).unwrap();

        assert!(r.err.is_empty());
        let out = String::from_utf8(r.out.clone()).unwrap();
        assert!(out.starts_with("You, ask for a card rank: there is no seat 9\n"));
        assert!(out.contains("Leaving the table."));
        assert!(out.contains("Your hand:"));
    }
}
