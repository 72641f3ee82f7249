use rayon::prelude::*;
use std::time::Instant;

use tessera_geom::Rect;
use tessera_mesh_cpu::{Grid, MeshBuilder, MeshOptions, MeshResult, MeshStats};

/// One build request against a shared grid.
#[derive(Clone, Copy, Debug)]
pub struct BuildRequest {
    pub max_variance: f64,
    pub rect: Rect,
    pub from_center: bool,
    pub options: MeshOptions,
}

#[derive(Clone, Copy, Debug)]
pub struct BuildReport {
    pub max_variance: f64,
    pub stats: MeshStats,
    pub ms: u32,
}

fn elapsed_ms(start: Instant) -> u32 {
    start.elapsed().as_millis().min(u128::from(u32::MAX)) as u32
}

pub fn run_build(grid: &Grid, req: &BuildRequest) -> MeshResult<BuildReport> {
    let start = Instant::now();
    let builder = MeshBuilder::from_grid(grid).with_options(req.options);
    let mesh = if req.from_center {
        builder.build_mesh_from_center(req.max_variance, req.rect)?
    } else {
        builder.build_mesh(req.max_variance, req.rect)?
    };
    Ok(BuildReport {
        max_variance: req.max_variance,
        stats: mesh.stats(req.rect.area()),
        ms: elapsed_ms(start),
    })
}

/// Builds once per variance in parallel; each task owns its builder.
/// Reports come back in the order of `variances`.
pub fn run_sweep(
    grid: &Grid,
    base: &BuildRequest,
    variances: &[f64],
) -> MeshResult<Vec<BuildReport>> {
    variances
        .par_iter()
        .map(|&max_variance| {
            run_build(
                grid,
                &BuildRequest {
                    max_variance,
                    ..*base
                },
            )
        })
        .collect()
}

pub fn log_report(rect: Rect, report: &BuildReport) {
    log::info!(
        "max_variance={} rect=({}, {}, {}x{}) vertices={} triangles={} reduction={:.1}% ms={}",
        report.max_variance,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        report.stats.vertices,
        report.stats.triangles,
        report.stats.reduction * 100.0,
        report.ms
    );
}
