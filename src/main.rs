mod config;
mod engine;
mod error;
mod game;
mod grid;
mod snake;
mod spawner;
mod term;

use std::process::exit;

use clap::Parser;
use tracing::{error, info};

use crate::config::{Args, Config};
use crate::engine::{GameState, TerminationReason};
use crate::error::{GameError, Result};
use crate::game::{InputSource, SessionEnd, SnakeGame};
use crate::grid::Grid;
use crate::spawner::Spawner;
use crate::term::{TermInput, TermManager};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() {
    let args = Args::parse();

    if let Err(err) = run(args) {
        error!(%err, "exiting with an error");
        eprintln!("{}", err);
        exit(err.exit_code());
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args)?;
    config::init_logging(&config)?;

    let grid = Grid::default();
    let spawner = Spawner::new(config.seed);
    info!(seed = spawner.seed(), tick_ms = config.tick_interval.as_millis() as u64, "starting");

    let mut term = TermManager::new(grid)?;
    let mut input = TermInput;
    term.setup()?;

    let mut game = SnakeGame::new(GameState::new(grid, spawner), config.tick_interval);
    let result = play(&mut game, &mut term, &mut input);

    // The terminal goes back to normal whatever happened above
    let restored = term.restore();
    let end = result?;
    restored?;

    let state = game.state();
    info!(?end, length = state.snake().len(), eaten = state.eaten(), "session over");
    Ok(())
}

fn play(game: &mut SnakeGame, term: &mut TermManager, input: &mut TermInput) -> Result<SessionEnd> {
    let end = game.play(input, term)?;

    if let SessionEnd::Terminated { reason, score } = end {
        let cause = match reason {
            TerminationReason::SelfCollision => "You bit yourself.",
            TerminationReason::NegativeScore => "Your score went negative.",
        };
        term.show_message(&[
            "Game over!",
            cause,
            &*format!("Score: {}", score),
            "",
            "Press any key to exit",
        ])?;

        // Keys mashed during the last frames should not dismiss the message
        input.poll_intents()?;
        input.read_key_blocking().map_err(GameError::from)?;
    }

    Ok(end)
}
