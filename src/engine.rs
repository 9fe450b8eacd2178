use std::time::Duration;

use tracing::{debug, info};

use crate::grid::{Cell, Grid};
use crate::snake::{Direction, Snake};
use crate::spawner::{Hazard, Spawner};

pub const START_CELL: Cell = Cell::new(10, 10);
pub const START_DIRECTION: Direction = Direction::Right;
pub const GROWTH_PER_REWARD: usize = 3;
pub const REWARD_POINTS: i32 = 10;
pub const HAZARD_PENALTY: i32 = 10;
/// A hazard appears after every this many rewards.
pub const HAZARD_EVERY: u32 = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TerminationReason {
    SelfCollision,
    NegativeScore,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Terminated(TerminationReason),
}

/// Everything one game session needs, owned in one place.
pub struct GameState {
    grid: Grid,
    snake: Snake,
    reward: Cell,
    hazard: Hazard,
    score: i32,
    eaten: u32,
    status: Status,
    spawner: Spawner,
}

impl GameState {
    pub fn new(grid: Grid, mut spawner: Spawner) -> Self {
        let reward = spawner.spawn_reward(&grid);
        GameState {
            grid,
            snake: Snake::new(START_CELL, START_DIRECTION),
            reward,
            hazard: Hazard::hidden(),
            score: 0,
            eaten: 0,
            status: Status::Running,
            spawner,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn reward(&self) -> Cell {
        self.reward
    }

    pub fn hazard(&self) -> &Hazard {
        &self.hazard
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Accepts or rejects a direction intent from the input side.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }

        let accepted = self.snake.steer(direction);
        if !accepted {
            debug!(?direction, travelling = ?self.snake.direction(), "reversal ignored");
        }
        accepted
    }

    /// Advances the game by one step. `now` is the time since the session began.
    pub fn tick(&mut self, now: Duration) -> Status {
        if !self.is_running() {
            return self.status;
        }

        let head = self.snake.advance(&self.grid);
        debug_assert!(self.grid.contains(head));

        if head == self.reward {
            self.snake.grow(GROWTH_PER_REWARD);
            self.score += REWARD_POINTS;
            self.reward = self.spawner.spawn_reward(&self.grid);
            self.eaten += 1;
            info!(x = head.x, y = head.y, score = self.score, eaten = self.eaten, "reward eaten");

            if self.eaten % HAZARD_EVERY == 0 {
                self.hazard = self.spawner.spawn_hazard(&self.grid, now);
                info!(x = self.hazard.cell.x, y = self.hazard.cell.y, "hazard spawned");
            }
        }

        if self.hazard.is_at(head) {
            self.score -= HAZARD_PENALTY;
            self.hazard.visible = false;
            info!(x = head.x, y = head.y, score = self.score, "hazard eaten");

            if self.score < 0 {
                return self.terminate(TerminationReason::NegativeScore);
            }
        }

        if self.hazard.expire_if_stale(now) {
            debug!("hazard expired");
        }

        if self.snake.bites_itself() {
            return self.terminate(TerminationReason::SelfCollision);
        }

        self.status
    }

    #[cfg(test)]
    pub fn set_reward(&mut self, cell: Cell) {
        self.reward = cell;
    }

    #[cfg(test)]
    pub fn set_hazard(&mut self, hazard: Hazard) {
        self.hazard = hazard;
    }

    fn terminate(&mut self, reason: TerminationReason) -> Status {
        info!(?reason, score = self.score, length = self.snake.len(), "game over");
        self.status = Status::Terminated(reason);
        self.status
    }
}
