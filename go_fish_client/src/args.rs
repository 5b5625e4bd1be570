use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "go-fish", version, about = "Play Go Fish against the computer in your terminal", long_about = None)]
pub struct Cli {
    /// Name of your seat
    #[arg(short, long, default_value = "You")]
    pub name: String,

    /// Number of computer opponents
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub computers: u8,

    /// Seed for the shuffle and the computers' choices (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// A player who gets cards from a request asks again before the turn passes
    #[arg(long, default_value_t = false)]
    pub go_again: bool,

    /// Print every game event as one JSON line instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Let the computer play your seat too and just watch
    #[arg(long, default_value_t = false)]
    pub watch: bool,
}

impl Cli {
    /// Seats in play order: your seat first, then the computers.
    pub fn seats(&self) -> Vec<(String, bool)> {
        let mut seats = vec![(self.name.clone(), !self.watch)];
        seats.extend((1..=self.computers).map(|i| (format!("Computer {i}"), false)));
        seats
    }
}
