use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use tessera_geom::Rect;
use tessera_mesh_cpu::MeshOptions;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TesseraConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub terrain: TerrainConfig,
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_size")]
    pub width: usize,
    #[serde(default = "default_grid_size")]
    pub height: usize,
    #[serde(default = "default_lat_min")]
    pub lat_min: f64,
    #[serde(default = "default_lat_max")]
    pub lat_max: f64,
    #[serde(default = "default_lon_min")]
    pub lon_min: f64,
    #[serde(default = "default_lon_max")]
    pub lon_max: f64,
}

fn default_grid_size() -> usize {
    257
}
fn default_lat_min() -> f64 {
    -35.0
}
fn default_lat_max() -> f64 {
    -34.0
}
fn default_lon_min() -> f64 {
    138.0
}
fn default_lon_max() -> f64 {
    139.0
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_size(),
            height: default_grid_size(),
            lat_min: default_lat_min(),
            lat_max: default_lat_max(),
            lon_min: default_lon_min(),
            lon_max: default_lon_max(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TerrainMode {
    Noise,
    Flat,
    Bump,
}

fn default_mode() -> TerrainMode {
    TerrainMode::Noise
}

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "default_mode")]
    pub mode: TerrainMode,
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    #[serde(default)]
    pub base: f64,
}

fn default_seed() -> i32 {
    1337
}
fn default_frequency() -> f32 {
    0.015
}
fn default_octaves() -> i32 {
    4
}
fn default_amplitude() -> f64 {
    600.0
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            seed: default_seed(),
            frequency: default_frequency(),
            octaves: default_octaves(),
            amplitude: default_amplitude(),
            base: 0.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MeshConfig {
    #[serde(default = "default_max_variance")]
    pub max_variance: f64,
    #[serde(default)]
    pub from_center: bool,
    #[serde(flatten)]
    pub options: MeshOptions,
    /// Sub-rectangle to mesh; the whole grid when absent.
    #[serde(default)]
    pub rect: Option<Rect>,
}

fn default_max_variance() -> f64 {
    10.0
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            max_variance: default_max_variance(),
            from_center: false,
            options: MeshOptions::default(),
            rect: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SweepConfig {
    #[serde(default)]
    pub variances: Vec<f64>,
}

impl TesseraConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<TesseraConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    TesseraConfig::from_toml_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = TesseraConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.grid.width, 257);
        assert_eq!(cfg.terrain.mode, TerrainMode::Noise);
        assert_eq!(cfg.mesh.max_variance, 10.0);
        assert!(cfg.mesh.rect.is_none());
        assert!(cfg.sweep.variances.is_empty());
    }

    #[test]
    fn mesh_section_overrides() {
        let cfg = TesseraConfig::from_toml_str(
            r#"
            [terrain]
            mode = "bump"
            [mesh]
            max_variance = 2.5
            from_center = true
            generate_texture_coordinates = true
            force_triangles = true
            rect = { x = 2, y = 3, width = 9, height = 5 }
            [sweep]
            variances = [1.0, 4.0]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.terrain.mode, TerrainMode::Bump);
        assert!(cfg.mesh.from_center);
        assert!(cfg.mesh.options.generate_texture_coordinates);
        assert!(cfg.mesh.options.force_triangles);
        assert_eq!(cfg.mesh.rect, Some(Rect::new(2, 3, 9, 5)));
        assert_eq!(cfg.sweep.variances, vec![1.0, 4.0]);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(TesseraConfig::from_toml_str("[terrain]\nmode = \"cliffs\"").is_err());
    }
}
