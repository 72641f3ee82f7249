//! CPU terrain meshing: binary-triangle-tree simplification of position grids.
#![forbid(unsafe_code)]

mod builder;
mod error;
mod full;
mod grid;
mod mesh;
pub mod tiling;
mod tree;
mod weld;

pub use builder::{MeshBuilder, MeshOptions};
pub use error::{MeshError, MeshResult};
pub use grid::Grid;
pub use mesh::{Mesh, MeshStats, Topology};
pub use tiling::{Seams, Square};
pub use tree::Triangle;

pub use tessera_geom::{Position, Rect};
