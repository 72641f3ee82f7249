use std::time::Instant;

use serde::{Deserialize, Serialize};
use tessera_geom::{Position, Rect, is_pow2_plus_one};

use crate::error::{MeshError, MeshResult};
use crate::full::full_mesh;
use crate::grid::{Grid, check_dims};
use crate::mesh::Mesh;
use crate::tiling::{Seams, Square, tile_rect, tile_rect_from_center};
use crate::tree::{TriTree, Triangle};
use crate::weld::weld_triangles;

/// Output switches shared by every build call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Emit per-vertex `(u, v)` relative to the full grid.
    pub generate_texture_coordinates: bool,
    /// Emit independent triangles instead of a strip for unsimplified meshes.
    pub force_triangles: bool,
}

/// Builds meshes over a borrowed position grid.
///
/// With `max_variance <= 0` every sample becomes a vertex. Otherwise the
/// rectangle is cut into power-of-two-plus-one squares, each square is
/// refined as a binary triangle tree until the elevation error of every face
/// is within `max_variance`, and the leaves are welded into one mesh. Edges
/// shared between squares are always refined to full resolution so tiles
/// meet without cracks.
#[derive(Clone, Copy, Debug)]
pub struct MeshBuilder<'a> {
    positions: &'a [Position],
    width: usize,
    height: usize,
    options: MeshOptions,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(positions: &'a [Position], width: usize, height: usize) -> MeshResult<Self> {
        check_dims(positions.len(), width, height)?;
        Ok(Self {
            positions,
            width,
            height,
            options: MeshOptions::default(),
        })
    }

    pub fn from_grid(grid: &'a Grid) -> Self {
        Self {
            positions: grid.positions(),
            width: grid.width(),
            height: grid.height(),
            options: MeshOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MeshOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_generate_texture_coordinates(&mut self, on: bool) -> &mut Self {
        self.options.generate_texture_coordinates = on;
        self
    }

    pub fn set_force_triangles(&mut self, on: bool) -> &mut Self {
        self.options.force_triangles = on;
        self
    }

    #[inline]
    pub fn generate_texture_coordinates(&self) -> bool {
        self.options.generate_texture_coordinates
    }

    #[inline]
    pub fn force_triangles(&self) -> bool {
        self.options.force_triangles
    }

    #[inline]
    pub fn options(&self) -> MeshOptions {
        self.options
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `build_mesh` over the whole grid.
    pub fn build_mesh_full_grid(&self, max_variance: f64) -> MeshResult<Mesh> {
        self.build_mesh(max_variance, Rect::full(self.width, self.height))
    }

    /// Simplified mesh of `rect`, tiled from its top-left corner.
    pub fn build_mesh(&self, max_variance: f64, rect: Rect) -> MeshResult<Mesh> {
        self.check_rect(rect)?;
        if max_variance <= 0.0 {
            return self.build_full_mesh(rect);
        }
        let squares = tile_rect(rect, false, false);
        Ok(self.build_squares(max_variance, rect, &squares, "btt_build"))
    }

    /// Like `build_mesh`, but tiles outward from the central square so tile
    /// boundaries end up near the border of `rect` rather than its middle.
    pub fn build_mesh_from_center(&self, max_variance: f64, rect: Rect) -> MeshResult<Mesh> {
        self.check_rect(rect)?;
        if max_variance <= 0.0 {
            return self.build_full_mesh(rect);
        }
        let squares = tile_rect_from_center(rect);
        Ok(self.build_squares(max_variance, rect, &squares, "btt_build_center"))
    }

    /// Unsimplified mesh of `rect`: a strip, or plain triangles when
    /// `force_triangles` is set.
    pub fn build_full_mesh(&self, rect: Rect) -> MeshResult<Mesh> {
        self.check_rect(rect)?;
        Ok(full_mesh(
            self.positions,
            self.width,
            self.height,
            rect,
            self.options.force_triangles,
            self.options.generate_texture_coordinates,
        ))
    }

    /// Leaf triangles for a single `size x size` square at `(x, y)`.
    /// `size` must be `2^n + 1`; edges flagged in `seams` are refined to full
    /// resolution regardless of variance.
    pub fn build_square(
        &self,
        max_variance: f64,
        x: usize,
        y: usize,
        size: usize,
        seams: Seams,
    ) -> MeshResult<Vec<Triangle>> {
        if !is_pow2_plus_one(size) {
            return Err(MeshError::invalid_argument(format!(
                "square size {} is not a power of two plus one",
                size
            )));
        }
        self.check_rect(Rect::new(x, y, size, size))?;
        let mut out = Vec::new();
        let square = Square { x, y, size, seams };
        TriTree::new(self.positions, self.width, square, max_variance).build(&mut out);
        Ok(out)
    }

    fn build_squares(&self, max_variance: f64, rect: Rect, squares: &[Square], what: &str) -> Mesh {
        let start = Instant::now();
        let mut triangles = Vec::new();
        for &square in squares {
            TriTree::new(self.positions, self.width, square, max_variance).build(&mut triangles);
        }
        let mesh = weld_triangles(
            self.positions,
            self.width,
            self.height,
            &triangles,
            self.options.generate_texture_coordinates,
        );
        log::debug!(
            "{} rect={:?} squares={} leaves={} vertices={}",
            what,
            rect,
            squares.len(),
            triangles.len(),
            mesh.vertex_count()
        );
        log::info!(
            target: "perf",
            "ms={} {} dims=({}, {}) max_variance={}",
            start.elapsed().as_millis(),
            what,
            rect.width,
            rect.height,
            max_variance
        );
        mesh
    }

    fn check_rect(&self, rect: Rect) -> MeshResult<()> {
        if !rect.fits_within(self.width, self.height) {
            return Err(MeshError::invalid_argument(format!(
                "rectangle {:?} is empty or outside the {}x{} grid",
                rect, self.width, self.height
            )));
        }
        Ok(())
    }
}
