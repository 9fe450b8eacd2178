use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::{Cell, Grid};

/// How long a hazard stays on the field if nobody eats it.
pub const HAZARD_LIFETIME: Duration = Duration::from_millis(4000);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hazard {
    pub cell: Cell,
    pub visible: bool,
    pub spawned_at: Duration,
}

impl Hazard {
    pub fn hidden() -> Self {
        Hazard { cell: Cell::new(0, 0), visible: false, spawned_at: Duration::ZERO }
    }

    pub fn is_at(&self, cell: Cell) -> bool {
        self.visible && self.cell == cell
    }

    /// Hides the hazard once it has been out for longer than its lifetime.
    /// Returns whether it expired on this call.
    pub fn expire_if_stale(&mut self, now: Duration) -> bool {
        if self.visible && now.saturating_sub(self.spawned_at) > HAZARD_LIFETIME {
            self.visible = false;
            return true;
        }

        false
    }
}

/// Places rewards and hazards. Cells under the snake are fair game.
pub struct Spawner {
    rng: StdRng,
    seed: u64,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Spawner { rng: StdRng::seed_from_u64(seed), seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn spawn_reward(&mut self, grid: &Grid) -> Cell {
        self.random_cell(grid)
    }

    pub fn spawn_hazard(&mut self, grid: &Grid, now: Duration) -> Hazard {
        Hazard { cell: self.random_cell(grid), visible: true, spawned_at: now }
    }

    fn random_cell(&mut self, grid: &Grid) -> Cell {
        let x = self.rng.gen_range(0..grid.width());
        let y = self.rng.gen_range(0..grid.height());
        Cell::new(x, y)
    }
}

pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_placements() {
        let grid = Grid::default();
        let mut a = Spawner::new(42);
        let mut b = Spawner::new(42);

        for i in 0..50 {
            assert_eq!(a.spawn_reward(&grid), b.spawn_reward(&grid));
            let now = Duration::from_millis(i * 100);
            assert_eq!(a.spawn_hazard(&grid, now), b.spawn_hazard(&grid, now));
        }
    }

    #[test]
    fn placements_stay_on_the_grid() {
        let grid = Grid::new(5, 3, 20);
        let mut spawner = Spawner::new(7);

        for _ in 0..500 {
            assert!(grid.contains(spawner.spawn_reward(&grid)));
        }
    }

    #[test]
    fn hazard_is_visible_and_timestamped() {
        let grid = Grid::default();
        let mut spawner = Spawner::new(1);
        let hazard = spawner.spawn_hazard(&grid, Duration::from_millis(1234));

        assert!(hazard.visible);
        assert_eq!(hazard.spawned_at, Duration::from_millis(1234));
        assert!(hazard.is_at(hazard.cell));
    }

    #[test]
    fn hazard_expires_after_its_lifetime() {
        let mut hazard = Hazard {
            cell: Cell::new(3, 3),
            visible: true,
            spawned_at: Duration::from_millis(1000),
        };

        assert!(!hazard.expire_if_stale(Duration::from_millis(5000)));
        assert!(hazard.visible);

        assert!(hazard.expire_if_stale(Duration::from_millis(5001)));
        assert!(!hazard.visible);
        assert!(!hazard.is_at(Cell::new(3, 3)));

        // Already gone
        assert!(!hazard.expire_if_stale(Duration::from_millis(9000)));
    }
}
