// src/grid/grid.rs

use crate::error::GridError;
use crate::map::RoadTile;
use crate::utils::geometry::GridPos;

/// A cell type that knows what "unoccupied at this position" looks like.
pub trait GridCell: Clone {
    fn empty_at(pos: GridPos) -> Self;
}

impl GridCell for RoadTile {
    fn empty_at(pos: GridPos) -> Self {
        RoadTile::empty(pos.x, pos.y)
    }
}

/// A fixed-size, column-major 2D container.
#[derive(Debug, Clone)]
pub struct Grid<T: GridCell> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

/// The grid the road generator works on.
pub type RoadGrid = Grid<RoadTile>;

impl<T: GridCell> Grid<T> {
    /// Create a grid with every cell set to its empty value.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let cells = Positions::new(width, height).map(T::empty_at).collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-failing bounds check.
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.is_valid_position(pos.x, pos.y)
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if !self.is_valid_position(x, y) {
            return Err(GridError::OutOfBounds {
                pos: GridPos::new(x, y),
                width: self.width,
                height: self.height,
            });
        }
        Ok((x * self.height + y) as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<&T, GridError> {
        let idx = self.index(x, y)?;
        Ok(&self.cells[idx])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Result<&mut T, GridError> {
        let idx = self.index(x, y)?;
        Ok(&mut self.cells[idx])
    }

    pub fn set(&mut self, x: i32, y: i32, value: T) -> Result<(), GridError> {
        let idx = self.index(x, y)?;
        self.cells[idx] = value;
        Ok(())
    }

    pub fn at(&self, pos: GridPos) -> Result<&T, GridError> {
        self.get(pos.x, pos.y)
    }

    pub fn at_mut(&mut self, pos: GridPos) -> Result<&mut T, GridError> {
        self.get_mut(pos.x, pos.y)
    }

    /// Every coordinate, column by column. Calling again restarts the walk.
    pub fn all_positions(&self) -> Positions {
        Positions::new(self.width, self.height)
    }

    /// Reset every cell to its empty value.
    pub fn clear(&mut self) {
        let positions = Positions::new(self.width, self.height);
        for (cell, pos) in self.cells.iter_mut().zip(positions) {
            *cell = T::empty_at(pos);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &T)> {
        self.all_positions().zip(self.cells.iter())
    }
}

impl Grid<RoadTile> {
    /// Number of cells holding road.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|t| t.is_occupied()).count()
    }

    /// `true` if `pos` is inside the grid and holds road.
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.at(pos).map(|t| t.is_occupied()).unwrap_or(false)
    }

    /// `true` if `pos` is inside the grid and holds no road.
    pub fn is_free(&self, pos: GridPos) -> bool {
        self.at(pos).map(|t| t.is_empty()).unwrap_or(false)
    }
}

/// Lazy iterator over all positions of a `width` x `height` grid.
#[derive(Debug, Clone)]
pub struct Positions {
    width: i32,
    height: i32,
    next: i32,
}

impl Positions {
    fn new(width: i32, height: i32) -> Self {
        Positions {
            width,
            height,
            next: 0,
        }
    }
}

impl Iterator for Positions {
    type Item = GridPos;

    fn next(&mut self) -> Option<GridPos> {
        if self.next >= self.width * self.height {
            return None;
        }
        let pos = GridPos::new(self.next / self.height, self.next % self.height);
        self.next += 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.width * self.height - self.next).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}
