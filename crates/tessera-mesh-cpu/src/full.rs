//! Unsimplified meshes: every sample in the rectangle becomes a vertex.

use tessera_geom::{Position, Rect};

use crate::mesh::{Mesh, Topology};
use crate::weld::grid_tex_coord;

pub(crate) fn full_mesh(
    positions: &[Position],
    width: usize,
    height: usize,
    rect: Rect,
    force_triangles: bool,
    with_tex_coords: bool,
) -> Mesh {
    let (w, h) = (rect.width, rect.height);
    let topology = if force_triangles {
        Topology::Triangles
    } else {
        Topology::TriangleStrip
    };
    let cells = (w - 1) * (h - 1);
    let index_count = if force_triangles {
        cells * 6
    } else {
        (h - 1) * w * 2
    };
    let mut mesh = Mesh::new(topology, with_tex_coords);
    mesh.reserve(w * h, index_count);

    for y in rect.y..rect.y + h {
        for x in rect.x..rect.x + w {
            let index = x + y * width;
            mesh.push_vertex(positions[index], grid_tex_coord(index, width, height));
        }
    }

    let w32 = w as u32;
    if force_triangles {
        for y in 0..h.saturating_sub(1) as u32 {
            for x in 0..w32.saturating_sub(1) {
                let k = x + y * w32;
                mesh.indices
                    .extend_from_slice(&[k, k + 1, k + w32, k + 1, k + w32 + 1, k + w32]);
            }
        }
    } else {
        // Snake: even rows run left to right, odd rows back. Each turn adds
        // one triangle repeating an index and one spanning a single column,
        // both without area, but keeps a single strip.
        for y in 0..h.saturating_sub(1) as u32 {
            let row = y * w32;
            if y % 2 == 0 {
                for x in 0..w32 {
                    mesh.indices.push(row + w32 + x);
                    mesh.indices.push(row + x);
                }
            } else {
                for x in (0..w32).rev() {
                    mesh.indices.push(row + x);
                    mesh.indices.push(row + w32 + x);
                }
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(w: usize, h: usize) -> Vec<Position> {
        (0..w * h)
            .map(|i| Position::new((i / w) as f64, (i % w) as f64, 0.0))
            .collect()
    }

    #[test]
    fn triangles_two_per_cell() {
        let pos = grid(3, 2);
        let mesh = full_mesh(&pos, 3, 2, Rect::full(3, 2), true, false);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 3, 1, 4, 3, 1, 2, 4, 2, 5, 4]);
    }

    #[test]
    fn strip_snakes_rows() {
        let pos = grid(2, 3);
        let mesh = full_mesh(&pos, 2, 3, Rect::full(2, 3), false, false);
        assert_eq!(mesh.topology, Topology::TriangleStrip);
        assert_eq!(mesh.indices, vec![2, 0, 3, 1, 3, 5, 2, 4]);
    }

    #[test]
    fn single_row_has_vertices_but_no_indices() {
        let pos = grid(4, 1);
        let mesh = full_mesh(&pos, 4, 1, Rect::full(4, 1), false, false);
        assert_eq!(mesh.vertex_count(), 4);
        assert!(mesh.is_empty());
    }
}
