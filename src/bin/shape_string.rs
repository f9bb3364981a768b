//! Print the shape string of one feature of a GeoJSON file.
//!
//! ```text
//! shape-string <geojson> [--feature-index N] [--precision P] [--keep-open]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use poiforge_core::geometry::{self, shape_string::DEFAULT_PRECISION};

/// Convert a GeoJSON polygon feature to a provider shape string
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// GeoJSON file (FeatureCollection or a single Feature)
    geojson: PathBuf,

    /// Zero-based index of the feature to convert
    #[arg(short = 'i', long, default_value_t = 0)]
    feature_index: usize,

    /// Decimal places to keep for each coordinate
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Do not repeat the starting point at the end of each ring
    #[arg(long)]
    keep_open: bool,
}

fn run(args: &Args) -> Result<String, String> {
    let text = std::fs::read_to_string(&args.geojson).map_err(|e| format!("{}: {}", args.geojson.display(), e))?;
    let document: serde_json::Value = serde_json::from_str(&text).map_err(|e| format!("invalid JSON: {e}"))?;

    let features = match document.get("type").and_then(|t| t.as_str()) {
        Some("FeatureCollection") => document
            .get("features")
            .and_then(|f| f.as_array())
            .cloned()
            .unwrap_or_default(),
        _ => vec![document],
    };
    if features.is_empty() {
        return Err("no features in input".to_string());
    }

    let index = args.feature_index.min(features.len() - 1);
    if index != args.feature_index {
        log::warn!(
            "Feature index {} out of range, using last feature ({})",
            args.feature_index,
            index
        );
    }

    geometry::feature_to_shape_string(&features[index], args.precision, !args.keep_open).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(shape) => {
            println!("{shape}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
