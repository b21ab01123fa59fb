use anyhow::{Context, Result};
use bridge_slope::{
    Bridge, BridgeParams, Config, ExportFormat, UnmappedPolicy, export_grid_csv,
    export_report_json,
};
use clap::Parser;
use log::{debug, info, warn};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Fit a sagging bridge and print it as slab/stair tiles", long_about = None)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Span in blocks (must be > 0)
    #[arg(short = 'd', long = "distance")]
    distance: Option<f64>,

    /// Height difference between the ends (positive raises the left end)
    #[arg(short = 'o', long = "offset", allow_negative_numbers = true)]
    offset: Option<f64>,

    /// Extra depth at mid-span
    #[arg(short = 's', long = "sag", allow_negative_numbers = true)]
    sag: Option<f64>,

    /// Fine cells per block (only 2 has tile patterns)
    #[arg(short = 'r', long = "resolution")]
    resolution: Option<usize>,

    /// Fail on windows that match no tile instead of leaving them empty
    #[arg(long = "strict")]
    strict: bool,

    /// Export format
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<ExportFormat>,

    /// Output directory for exported files
    #[arg(long = "output")]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    let config = build_config(&args)?;
    debug!("{config:#?}");

    let bridge = Bridge::compute(config.bridge, &config.raster).with_context(|| {
        format!(
            "failed to compute bridge (distance={}, offset={}, sag={})",
            config.bridge.distance, config.bridge.offset, config.bridge.sag
        )
    })?;

    info!("y = {}", bridge.curve());
    info!(
        "left=({}, {}) right=({}, {}) vertex=({}, {})",
        bridge.left().x,
        bridge.left().y,
        bridge.right().x,
        bridge.right().y,
        bridge.vertex().x,
        bridge.vertex().y
    );
    for (block, count) in bridge.grid().counts() {
        info!("{block}: {count}");
    }

    println!("{}", bridge.grid());

    let output_dir = Some(config.output.dir.as_path());
    let path = match config.output.format {
        ExportFormat::Csv => Some(export_grid_csv(bridge.grid(), output_dir)?),
        ExportFormat::Json => Some(export_report_json(&bridge.report(), output_dir)?),
        ExportFormat::None => None,
    };
    if let Some(path) = path {
        info!("Grid saved to: {}", path.display());
    }

    Ok(())
}

/// defaults ← config file ← environment ← command line
fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) if path.exists() => Config::load_from_file(path)?,
        Some(path) => {
            warn!(
                "Config file not found: {}, using default settings",
                path.display()
            );
            Config::default()
        }
        None => Config::default(),
    };

    config.apply_env()?;

    let BridgeParams {
        distance,
        offset,
        sag,
    } = config.bridge;
    config.bridge = BridgeParams::new(
        args.distance.unwrap_or(distance),
        args.offset.unwrap_or(offset),
        args.sag.unwrap_or(sag),
    );
    if let Some(resolution) = args.resolution {
        config.raster.resolution = resolution;
    }
    if args.strict {
        config.raster.unmapped = UnmappedPolicy::Error;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}
