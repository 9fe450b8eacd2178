use crate::snake::Direction::{self, *};

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const CELL_SIZE: i32 = 20;

/// A position on the grid, in cells rather than pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The neighbouring cell in `direction`, not yet wrapped.
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Up => Cell::new(self.x, self.y - 1),
            Down => Cell::new(self.x, self.y + 1),
            Left => Cell::new(self.x - 1, self.y),
            Right => Cell::new(self.x + 1, self.y),
        }
    }
}

/// Pixel rectangle covered by a cell on the drawing surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Grid { width, height, cell_size }
    }

    /// Grid laid over a surface of the given pixel size.
    pub fn for_surface(px_width: i32, px_height: i32, cell_size: i32) -> Self {
        Grid::new(px_width / cell_size, px_height / cell_size, cell_size)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    pub fn to_cell(&self, px: i32, py: i32) -> Cell {
        Cell::new(px.div_euclid(self.cell_size), py.div_euclid(self.cell_size))
    }

    pub fn to_pixel_rect(&self, cell: Cell) -> Rect {
        Rect {
            x: cell.x * self.cell_size,
            y: cell.y * self.cell_size,
            w: self.cell_size,
            h: self.cell_size,
        }
    }

    /// Folds a cell that stepped off one edge back onto the opposite edge.
    /// Only ever one step out of bounds, so no modulo.
    pub fn wrap(&self, cell: Cell) -> Cell {
        let wrap_axis = |v: i32, dim: i32| {
            if v < 0 {
                dim - 1
            } else if v >= dim {
                0
            } else {
                v
            }
        };

        Cell::new(wrap_axis(cell.x, self.width), wrap_axis(cell.y, self.height))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::for_surface(SCREEN_WIDTH, SCREEN_HEIGHT, CELL_SIZE)
    }
}
