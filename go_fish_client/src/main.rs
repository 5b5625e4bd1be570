mod args;
mod input;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use go_fish_core::{GameEvent, GamePhase, GameState, PlayerCommand};

use crate::args::Cli;
use crate::input::{HELP, Input, parse_line, resolve_opponent};
use crate::render::Renderer;

type InputLines = Lines<BufReader<Stdin>>;

/// How a turn ended from the driver's point of view.
enum TurnResult {
    /// The player acted; `true` when the request caught cards.
    Played(bool),
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // logs go to stderr so they never mix with the table output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut game = GameState::new(cli.seats(), &mut rng).context("setting up the table")?;
    info!(players = game.players().len(), seed = ?cli.seed, go_again = cli.go_again, "new game");

    let mut renderer = Renderer::new(cli.json);
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    renderer.note("--- Go Fish ---")?;
    renderer.note(&format!("--- {}'s turn ---", game.current_player().name()))?;

    while game.phase() != GamePhase::GameOver {
        let turn = if game.current_player().is_human() {
            human_turn(&mut game, &mut stdin, &mut renderer).await?
        } else {
            computer_turn(&mut game, &mut rng, &mut renderer)?
        };

        let caught = match turn {
            TurnResult::Played(caught) => caught,
            TurnResult::Quit => {
                renderer.note("Leaving the table.")?;
                return Ok(());
            }
        };

        if caught && cli.go_again && !game.is_over() {
            debug!(player = game.current_player().name(), "caught cards, going again");
            continue;
        }

        let events = game.end_turn()?;
        renderer.events(&game, &events)?;
    }

    let viewer = game.players()[0].id();
    renderer.view(&game.for_player(viewer))?;
    Ok(())
}

/// Reads commands until the human makes a request or quits.
///
/// Each turn opens with the human's hand, or their `GameView` in JSON mode.
async fn human_turn(game: &mut GameState, stdin: &mut InputLines, renderer: &mut Renderer) -> Result<TurnResult> {
    let me = game.current_player().id();

    if !game.current_player().has_cards() {
        renderer.message("You have no cards left, so your turn passes.")?;
        return Ok(TurnResult::Played(false));
    }
    renderer.hand(game, me)?;

    loop {
        renderer.prompt(&format!("{}, ask for a card rank: ", game.current_player().name()))?;

        let Some(line) = stdin.next_line().await.context("reading from stdin")? else {
            return Ok(TurnResult::Quit);
        };

        let (target, rank) = match parse_line(&line) {
            Ok(Input::Ask { target, rank }) => (target, rank),
            Ok(Input::Nothing) => continue,
            Ok(Input::Quit) => return Ok(TurnResult::Quit),
            Ok(Input::Hand) => {
                renderer.hand(game, me)?;
                continue;
            }
            Ok(Input::Status) => {
                renderer.view(&game.for_player(me))?;
                continue;
            }
            Ok(Input::Help) => {
                renderer.message(HELP)?;
                continue;
            }
            Err(message) => {
                renderer.message(&message)?;
                continue;
            }
        };

        let opponent = match resolve_opponent(game, target.as_deref()) {
            Ok(opponent) => opponent,
            Err(message) => {
                renderer.message(&message)?;
                continue;
            }
        };

        // rejected requests (asking yourself, ...) cost nothing, just ask again
        match game.ask(me, opponent, rank) {
            Ok(events) => {
                renderer.events(game, &events)?;
                renderer.hand(game, me)?;
                return Ok(TurnResult::Played(events.iter().any(GameEvent::is_catch)));
            }
            Err(e) => renderer.message(&e.to_string())?,
        }
    }
}

/// One random request for a computer seat. Empty-handed computers sit the turn out.
fn computer_turn(game: &mut GameState, rng: &mut StdRng, renderer: &mut Renderer) -> Result<TurnResult> {
    let player = game.current_player();
    if !player.has_cards() {
        info!(player = player.name(), "no cards to ask for, skipping the request");
        renderer.note(&format!("{} has no cards and passes.", player.name()))?;
        return Ok(TurnResult::Played(false));
    }

    let events = game.handle_command(PlayerCommand::Automated, rng)?;
    renderer.events(game, &events)?;
    Ok(TurnResult::Played(events.iter().any(GameEvent::is_catch)))
}
