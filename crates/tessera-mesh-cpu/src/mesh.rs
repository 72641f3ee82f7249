use tessera_geom::Position;

/// How `Mesh::indices` is to be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Independent triangles, three indices each.
    Triangles,
    /// One connected strip; winding alternates per triangle.
    TriangleStrip,
}

/// Output of a build: welded vertices plus indices and optional UVs.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Position>,
    pub indices: Vec<u32>,
    /// One `(u, v)` pair per vertex when texture coordinates were requested.
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub topology: Topology,
}

impl Mesh {
    pub(crate) fn new(topology: Topology, with_tex_coords: bool) -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
            tex_coords: with_tex_coords.then(Vec::new),
            topology,
        }
    }

    /// Pre-reserve capacity for `vertices` vertices and `indices` indices.
    #[inline]
    pub(crate) fn reserve(&mut self, vertices: usize, indices: usize) {
        self.positions.reserve(vertices);
        self.indices.reserve(indices);
        if let Some(tc) = self.tex_coords.as_mut() {
            tc.reserve(vertices);
        }
    }

    /// Appends a vertex and returns its index.
    #[inline]
    pub(crate) fn push_vertex(&mut self, p: Position, uv: [f32; 2]) -> u32 {
        let i = self.positions.len() as u32;
        self.positions.push(p);
        if let Some(tc) = self.tex_coords.as_mut() {
            tc.push(uv);
        }
        i
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of primitives described by the index buffer. For strips this
    /// counts degenerate turn triangles too.
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::TriangleStrip => self.indices.len().saturating_sub(2),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Yields index triples with uniform winding. Strip triangles are
    /// un-alternated and degenerate ones are skipped: triples repeating an
    /// index, and evenly spaced triples. Strip vertices are row-major, so the
    /// latter is a run down one column at a row turn.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let strip = self.topology == Topology::TriangleStrip;
        let count = self.triangle_count();
        (0..count).filter_map(move |i| {
            if !strip {
                let k = i * 3;
                return Some([self.indices[k], self.indices[k + 1], self.indices[k + 2]]);
            }
            let (a, b, c) = (self.indices[i], self.indices[i + 1], self.indices[i + 2]);
            if a == b || b == c || a == c {
                return None;
            }
            if i64::from(b) - i64::from(a) == i64::from(c) - i64::from(b) {
                return None;
            }
            Some(if i % 2 == 0 { [a, b, c] } else { [b, a, c] })
        })
    }

    /// Summary against the number of grid points the mesh was built from.
    pub fn stats(&self, grid_points: usize) -> MeshStats {
        let vertices = self.vertex_count();
        let reduction = if grid_points == 0 {
            0.0
        } else {
            1.0 - vertices as f64 / grid_points as f64
        };
        MeshStats {
            vertices,
            triangles: self.triangles().count(),
            reduction,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    /// Fraction of source grid points dropped, in `[0, 1]`.
    pub reduction: f64,
}
