//! Turns leaf triangles into an indexed mesh, one vertex per distinct position.

use hashbrown::HashMap;
use tessera_geom::{Position, PositionKey};

use crate::mesh::{Mesh, Topology};
use crate::tree::Triangle;

/// Texture coordinate of grid sample `index` relative to the full grid, so
/// sub-meshes line up with a texture draped over the whole grid.
#[inline]
pub(crate) fn grid_tex_coord(index: usize, width: usize, height: usize) -> [f32; 2] {
    let (x, y) = (index % width, index / width);
    let u = if width > 1 { x as f32 / (width - 1) as f32 } else { 0.0 };
    let v = if height > 1 { y as f32 / (height - 1) as f32 } else { 0.0 };
    [u, v]
}

/// Welds vertices by position identity in first-seen order.
pub(crate) fn weld_triangles(
    positions: &[Position],
    width: usize,
    height: usize,
    triangles: &[Triangle],
    with_tex_coords: bool,
) -> Mesh {
    let mut mesh = Mesh::new(Topology::Triangles, with_tex_coords);
    // Leaves share most corners; ~half as many vertices as triangles.
    mesh.reserve(triangles.len() / 2 + 2, triangles.len() * 3);
    let mut seen: HashMap<PositionKey, u32> = HashMap::with_capacity(triangles.len() / 2 + 2);
    for tri in triangles {
        for index in tri.corners() {
            let p = positions[index];
            let i = *seen
                .entry(p.key())
                .or_insert_with(|| mesh.push_vertex(p, grid_tex_coord(index, width, height)));
            mesh.indices.push(i);
        }
    }
    mesh
}
