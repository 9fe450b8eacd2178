use std::{io, thread::sleep, time::{Duration, Instant}};

use tracing::info;

use crate::engine::{GameState, Status, TerminationReason};
use crate::snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Steer(Direction),
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Terminated { reason: TerminationReason, score: i32 },
    Quit { score: i32 },
}

/// Where intents come from. Must not block.
pub trait InputSource {
    fn poll_intents(&mut self) -> io::Result<Vec<Intent>>;
}

/// Draws the current state. Never feeds anything back into it.
pub trait Presenter {
    fn present(&mut self, state: &GameState) -> io::Result<()>;
}

pub struct SnakeGame {
    state: GameState,
    tick_interval: Duration,
}

impl SnakeGame {
    pub fn new(state: GameState, tick_interval: Duration) -> Self {
        SnakeGame { state, tick_interval }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Input, one tick, one frame, then the fixed delay; over and over until
    /// the game ends or the player quits.
    pub fn play<I, P>(&mut self, input: &mut I, presenter: &mut P) -> io::Result<SessionEnd>
    where
        I: InputSource,
        P: Presenter,
    {
        let started = Instant::now();
        presenter.present(&self.state)?;

        loop {
            for intent in input.poll_intents()? {
                match intent {
                    Intent::Quit => {
                        info!(score = self.state.score(), "player quit");
                        return Ok(SessionEnd::Quit { score: self.state.score() });
                    }
                    Intent::Steer(dir) => {
                        self.state.steer(dir);
                    }
                }
            }

            let status = self.state.tick(started.elapsed());
            presenter.present(&self.state)?;

            if let Status::Terminated(reason) = status {
                return Ok(SessionEnd::Terminated { reason, score: self.state.score() });
            }

            sleep(self.tick_interval);
        }
    }
}
