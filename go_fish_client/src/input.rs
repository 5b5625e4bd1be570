use go_fish_core::{GameState, PlayerId, Rank};

/// One line typed by the human player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `target` is a seat number or a name; `None` means the next seat.
    Ask { target: Option<String>, rank: Rank },
    Hand,
    Status,
    Help,
    Quit,
    /// Blank line: no action this attempt.
    Nothing,
}

pub const HELP: &str = "\
Commands:
  <rank>                  ask the next player for a rank, e.g. `7` or `q`
  ask <player> <rank>     ask a player (seat number or name) for a rank
  hand                    show your hand
  status                  show hand sizes, books and the deck
  help                    show this help
  quit                    leave the game";

/// Parses a command line. The error is a message for the player.
pub fn parse_line(line: &str) -> Result<Input, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let input = match parts.as_slice() {
        [] => Input::Nothing,
        ["quit" | "exit"] => Input::Quit,
        ["hand"] => Input::Hand,
        ["status"] => Input::Status,
        ["help" | "?"] => Input::Help,
        ["ask", rank] | [rank] => Input::Ask { target: None, rank: parse_rank(rank)? },
        ["ask", target @ .., rank] if !target.is_empty() => Input::Ask {
            target: Some(target.join(" ")),
            rank: parse_rank(rank)?,
        },
        _ => return Err(format!("unknown command `{}`, type `help`", line.trim())),
    };
    Ok(input)
}

fn parse_rank(s: &str) -> Result<Rank, String> {
    s.parse::<Rank>().map_err(|e| e.to_string())
}

/// Finds the player a request is aimed at.
///
/// No target means the seat after the current player, like the classic table.
/// Seat numbers are 1-based as printed by `status`.
pub fn resolve_opponent(game: &GameState, target: Option<&str>) -> Result<PlayerId, String> {
    let players = game.players();
    let Some(target) = target else {
        let next = (game.current_player_idx() + 1) % players.len();
        return Ok(players[next].id());
    };

    if let Ok(seat) = target.parse::<usize>() {
        return seat
            .checked_sub(1)
            .and_then(|idx| players.get(idx))
            .map(|p| p.id())
            .ok_or_else(|| format!("there is no seat {seat}"));
    }
    players
        .iter()
        .find(|p| p.name().eq_ignore_ascii_case(target))
        .map(|p| p.id())
        .ok_or_else(|| format!("nobody called `{target}` is at the table"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table() -> GameState {
        GameState::new(
            [("You", true), ("Computer 1", false), ("Computer 2", false)],
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_plain_rank() {
        assert_eq!(parse_line("7"), Ok(Input::Ask { target: None, rank: Rank::Seven }));
        assert_eq!(parse_line("  q "), Ok(Input::Ask { target: None, rank: Rank::Queen }));
        assert_eq!(parse_line("ask 10"), Ok(Input::Ask { target: None, rank: Rank::Ten }));
    }

    #[test]
    fn test_parse_targeted_ask() {
        assert_eq!(
            parse_line("ask 3 k"),
            Ok(Input::Ask { target: Some("3".to_string()), rank: Rank::King })
        );
        assert_eq!(
            parse_line("ask Computer 1 ace"),
            Ok(Input::Ask { target: Some("Computer 1".to_string()), rank: Rank::Ace })
        );
    }

    #[test]
    fn test_parse_commands_and_noise() {
        assert_eq!(parse_line(""), Ok(Input::Nothing));
        assert_eq!(parse_line("   "), Ok(Input::Nothing));
        assert_eq!(parse_line("quit"), Ok(Input::Quit));
        assert_eq!(parse_line("hand"), Ok(Input::Hand));
        assert_eq!(parse_line("status"), Ok(Input::Status));
        assert_eq!(parse_line("?"), Ok(Input::Help));
        assert!(parse_line("joker").unwrap_err().contains("joker"));
        assert!(parse_line("ask 2 zz").is_err());
        assert!(parse_line("give me sevens").is_err());
    }

    #[test]
    fn test_resolve_default_is_next_seat() {
        let mut game = table();
        assert_eq!(resolve_opponent(&game, None), Ok(game.players()[1].id()));
        game.advance_turn();
        game.advance_turn();
        assert_eq!(resolve_opponent(&game, None), Ok(game.players()[0].id()));
    }

    #[test]
    fn test_resolve_by_seat_or_name() {
        let game = table();
        assert_eq!(resolve_opponent(&game, Some("3")), Ok(game.players()[2].id()));
        assert_eq!(resolve_opponent(&game, Some("computer 1")), Ok(game.players()[1].id()));
        assert!(resolve_opponent(&game, Some("0")).is_err());
        assert!(resolve_opponent(&game, Some("4")).is_err());
        assert!(resolve_opponent(&game, Some("Nemo")).is_err());
    }
}
