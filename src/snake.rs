use std::collections::VecDeque;

use crate::grid::{Cell, Grid};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

pub struct Snake {
    // Head at the front
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    length: usize,
}

impl Snake {
    pub fn new(pos: Cell, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(pos);
        Snake { body, direction, pending_direction: None, length: 1 }
    }

    /// Builds a snake from already positioned segments, head first.
    #[cfg(test)]
    pub fn from_segments(segments: &[Cell], direction: Direction) -> Self {
        assert!(!segments.is_empty());
        let body: VecDeque<Cell> = segments.iter().copied().collect();
        let length = body.len();
        Snake { body, direction, pending_direction: None, length }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Segments that already have a position, head first.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    /// Logical length, including growth that has not materialized yet.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Queues a turn for the next advance. A turn straight back onto the
    /// current travel direction is refused, no matter what was queued before.
    pub fn steer(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.pending_direction = Some(new_direction);
        true
    }

    /// Every segment moves into the cell of the one ahead of it, then the head
    /// steps once and wraps around the grid edges. Returns the new head.
    pub fn advance(&mut self, grid: &Grid) -> Cell {
        if let Some(dir) = self.pending_direction.take() {
            self.direction = dir;
        }

        let new_head = grid.wrap(self.head().step(self.direction));
        self.body.push_front(new_head);

        // Pending growth keeps the old tail in place instead of dropping it
        while self.body.len() > self.length {
            self.body.pop_back();
        }

        new_head
    }

    pub fn grow(&mut self, n: usize) {
        self.length += n;
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|seg| *seg == head)
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
