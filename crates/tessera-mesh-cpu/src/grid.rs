use tessera_geom::{Position, Rect};

use crate::error::{MeshError, MeshResult};

/// Immutable row-major grid of positions, indexed `x + y * width`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    positions: Vec<Position>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(positions: Vec<Position>, width: usize, height: usize) -> MeshResult<Self> {
        check_dims(positions.len(), width, height)?;
        Ok(Self {
            positions,
            width,
            height,
        })
    }

    /// Builds a grid by sampling `f(x, y)` in row-major order.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Position,
    ) -> MeshResult<Self> {
        let mut positions = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                positions.push(f(x, y));
            }
        }
        Self::new(positions, width, height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Position> {
        if x < self.width && y < self.height {
            self.positions.get(self.index(x, y))
        } else {
            None
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::full(self.width, self.height)
    }

    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }
}

pub(crate) fn check_dims(len: usize, width: usize, height: usize) -> MeshResult<()> {
    if width == 0 || height == 0 {
        return Err(MeshError::invalid_argument(format!(
            "grid dimensions must be non-zero, got {}x{}",
            width, height
        )));
    }
    if width.checked_mul(height) != Some(len) {
        return Err(MeshError::invalid_argument(format!(
            "position count {} does not match {}x{} grid",
            len, width, height
        )));
    }
    Ok(())
}
