use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

mod config;
mod sweep;
mod terrain;

use config::{TesseraConfig, load_config_from_path};
use sweep::{BuildRequest, log_report, run_build, run_sweep};

#[derive(Parser, Debug)]
#[command(name = "tessera", about = "Adaptive terrain meshing with binary triangle trees")]
struct Cli {
    /// TOML config; built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides mesh.max_variance
    #[arg(long)]
    max_variance: Option<f64>,
    /// Tile outward from the centre of the rectangle
    #[arg(long)]
    from_center: bool,
    /// Comma-separated variances to build in parallel (overrides sweep.variances)
    #[arg(long, value_delimiter = ',')]
    sweep: Vec<f64>,
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn init_logging(level: LevelFilter) {
    let cfg = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_time_level(LevelFilter::Off)
        .build();
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(level, cfg, TerminalMode::Stderr, ColorChoice::Auto);
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = match cli.config.as_deref() {
        Some(path) => load_config_from_path(path)?,
        None => TesseraConfig::default(),
    };
    if let Some(v) = cli.max_variance {
        cfg.mesh.max_variance = v;
    }
    if cli.from_center {
        cfg.mesh.from_center = true;
    }
    if !cli.sweep.is_empty() {
        cfg.sweep.variances = cli.sweep;
    }

    let grid = terrain::generate_grid(&cfg.grid, &cfg.terrain)?;
    log::info!(
        "grid {}x{} mode={:?} seed={}",
        grid.width(),
        grid.height(),
        cfg.terrain.mode,
        cfg.terrain.seed
    );

    let req = BuildRequest {
        max_variance: cfg.mesh.max_variance,
        rect: cfg.mesh.rect.unwrap_or_else(|| grid.rect()),
        from_center: cfg.mesh.from_center,
        options: cfg.mesh.options,
    };
    if cfg.sweep.variances.is_empty() {
        let report = run_build(&grid, &req)?;
        log_report(req.rect, &report);
    } else {
        for report in run_sweep(&grid, &req, &cfg.sweep.variances)? {
            log_report(req.rect, &report);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
