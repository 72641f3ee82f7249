//! Synthetic elevation grids for driving the mesher without real data.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use tessera_geom::Position;
use tessera_mesh_cpu::{Grid, MeshResult};

use crate::config::{GridConfig, TerrainConfig, TerrainMode};

fn make_noise(cfg: &TerrainConfig) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(cfg.seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(cfg.frequency));
    if cfg.octaves > 1 {
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(cfg.octaves));
    }
    noise
}

/// Samples a `width x height` grid spanning the configured lat/lon box.
/// Row 0 is the northern edge.
pub fn generate_grid(grid: &GridConfig, terrain: &TerrainConfig) -> MeshResult<Grid> {
    let noise = make_noise(terrain);
    let step = |min: f64, max: f64, n: usize| {
        if n > 1 {
            (max - min) / (n - 1) as f64
        } else {
            0.0
        }
    };
    let dlat = step(grid.lat_min, grid.lat_max, grid.height);
    let dlon = step(grid.lon_min, grid.lon_max, grid.width);
    let (cx, cy) = (grid.width / 2, grid.height / 2);
    Grid::from_fn(grid.width, grid.height, |x, y| {
        let elevation = match terrain.mode {
            TerrainMode::Flat => terrain.base,
            TerrainMode::Bump if (x, y) == (cx, cy) => terrain.base + terrain.amplitude,
            TerrainMode::Bump => terrain.base,
            TerrainMode::Noise => {
                let n = noise.get_noise_2d(x as f32, y as f32) as f64;
                terrain.base + (n + 1.0) * 0.5 * terrain.amplitude
            }
        };
        Position::new(
            grid.lat_max - y as f64 * dlat,
            grid.lon_min + x as f64 * dlon,
            elevation,
        )
    })
}
