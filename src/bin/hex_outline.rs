//! Command-line front end: GeoJSON points in, one outline file per cluster out
//!
//! `hex-outline points.geojson -o output --filter "Case Summary=Alarm Permit" --cells`

use anyhow::{bail, Context, Result};
use clap::Parser;
use geo_hex_outline::{
    cells_to_collection, process_points, read_points, write_outlines, H3Index, OutlineConfig, PropertyFilter,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(clap::Parser)]
struct ClArgs {
    /// GeoJSON FeatureCollection of Point features
    #[arg()]
    input: PathBuf,

    /// Directory receiving `{index}.geojson` per group
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep only features whose property equals a value, as KEY=VALUE
    #[arg(short, long)]
    filter: Option<String>,

    /// H3 resolution
    #[arg(short, long)]
    resolution: Option<u8>,

    /// Douglas–Peucker tolerance in degrees
    #[arg(long)]
    simplify_tolerance: Option<f64>,

    /// Buffer margin in degrees (0 disables)
    #[arg(long)]
    buffer_margin: Option<f64>,

    /// Chaikin smoothing passes
    #[arg(long)]
    iterations: Option<u32>,

    /// Chaikin cut ratio in (0, 0.5]
    #[arg(long)]
    ratio: Option<f64>,

    /// Round exported coordinates to this many decimals (default: full precision)
    #[arg(long)]
    precision: Option<u32>,

    /// Also write the aggregated cells to `cells.geojson`
    #[arg(long)]
    cells: bool,

    /// Verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn parse_filter(raw: &str) -> Result<PropertyFilter> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(PropertyFilter::new(key, value)),
        _ => bail!("filter must look like KEY=VALUE, got {:?}", raw),
    }
}

fn load_config(args: &ClArgs) -> Result<OutlineConfig> {
    let mut config = match &args.config {
        Some(path) => OutlineConfig::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => OutlineConfig::default(),
    };

    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if let Some(tolerance) = args.simplify_tolerance {
        config.simplify_tolerance = tolerance;
    }
    if let Some(margin) = args.buffer_margin {
        config.buffer_margin = margin;
    }
    if let Some(iterations) = args.iterations {
        config.smooth_iterations = iterations;
    }
    if let Some(ratio) = args.ratio {
        config.smooth_ratio = ratio;
    }
    if args.precision.is_some() {
        config.precision = args.precision;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = ClArgs::parse();

    let tracing_subscriber = FmtSubscriber::builder()
        .with_max_level(match args.verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        })
        .finish();
    tracing::subscriber::set_global_default(tracing_subscriber)
        .context("setting default tracing subscriber failed")?;

    let config = load_config(&args)?;
    let filter = args.filter.as_deref().map(parse_filter).transpose()?;

    let points = read_points(&args.input, filter.as_ref())
        .with_context(|| format!("reading points from {}", args.input.display()))?;
    if points.is_empty() {
        bail!("no usable points in {}", args.input.display());
    }
    info!("read {} points", points.len());

    let (cells, mut batch) = process_points(&points, &H3Index, &config);

    let files = write_outlines(&args.output_dir, &batch.outlines, config.precision)
        .with_context(|| format!("writing outlines to {}", args.output_dir.display()))?;
    batch.report.exported = files.len();

    if args.cells {
        let path = args.output_dir.join("cells.geojson");
        let collection = cells_to_collection(&cells, config.precision);
        std::fs::write(&path, serde_json::to_string_pretty(&collection)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    println!("{}", batch.report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        let filter = parse_filter("Case Summary=Alarm Permit").unwrap();
        assert_eq!(filter.key, "Case Summary");
        assert_eq!(filter.value, "Alarm Permit");

        assert!(parse_filter("no-equals").is_err());
        assert!(parse_filter("=value").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = ClArgs::parse_from(["hex-outline", "in.geojson", "--iterations", "3", "--buffer-margin", "0"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.smooth_iterations, 3);
        assert_eq!(config.buffer_margin, 0.0);
        assert_eq!(config.resolution, 8);
        assert_eq!(config.precision, None);

        let args = ClArgs::parse_from(["hex-outline", "in.geojson", "--precision", "7"]);
        assert_eq!(load_config(&args).unwrap().precision, Some(7));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = ClArgs::parse_from(["hex-outline", "in.geojson", "--ratio", "0.9"]);
        assert!(load_config(&args).is_err());
    }
}
