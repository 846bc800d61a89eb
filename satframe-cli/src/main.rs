//! Satframe CLI - satellite image display loop
//!
//! Fetches full-disk satellite imagery on a fixed cadence, caches frames
//! in a bounded store, and renders the newest frame plus a trailing
//! animation to an output file.

mod error;
mod runner;

use clap::{Parser, ValueEnum};
use satframe::satellite::Satellite;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SatelliteArg {
    /// GOES-16 full-disk GEOCOLOR (10 minute cadence)
    GoesEast,
    /// GOES-18 full-disk GEOCOLOR (10 minute cadence)
    GoesWest,
    /// Elektro-L No.2 (30 minute cadence)
    ElektroL,
}

impl From<SatelliteArg> for Satellite {
    fn from(arg: SatelliteArg) -> Self {
        match arg {
            SatelliteArg::GoesEast => Satellite::GoesEast,
            SatelliteArg::GoesWest => Satellite::GoesWest,
            SatelliteArg::ElektroL => Satellite::ElektroL,
        }
    }
}

#[derive(Parser)]
#[command(name = "satframe")]
#[command(about = "Display geostationary satellite imagery with a bounded flash cache", long_about = None)]
struct Args {
    /// Imagery source
    #[arg(long, value_enum, default_value = "elektro-l")]
    satellite: SatelliteArg,

    /// CDN endpoint base URL (trailing slash included)
    #[arg(long, default_value = "https://ik.imagekit.io/satframe/")]
    endpoint: String,

    /// Storage root for the frame cache
    #[arg(long, default_value = "data")]
    storage_root: PathBuf,

    /// Output path for the rendered frame
    #[arg(long, default_value = "frame.png")]
    frame: PathBuf,

    /// Display width in pixels
    #[arg(long, default_value_t = 240)]
    width: u32,

    /// Display height in pixels
    #[arg(long, default_value_t = 240)]
    height: u32,

    /// Seconds between polling cycles
    #[arg(long, default_value_t = 600)]
    update_interval: u64,

    /// Flash capacity budget for the cache, in bytes
    #[arg(long, default_value_t = 2 * 1024 * 1024)]
    flash_capacity: u64,

    /// Evict the whole cache before the first cycle
    #[arg(long)]
    clean: bool,

    /// Force debug-level logging
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = runner::run(args) {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satellite_arg_maps_to_variant() {
        assert_eq!(Satellite::from(SatelliteArg::GoesEast), Satellite::GoesEast);
        assert_eq!(Satellite::from(SatelliteArg::GoesWest), Satellite::GoesWest);
        assert_eq!(Satellite::from(SatelliteArg::ElektroL), Satellite::ElektroL);
    }

    #[test]
    fn test_args_parse_with_defaults() {
        let args = Args::parse_from(["satframe"]);

        assert_eq!(args.width, 240);
        assert_eq!(args.update_interval, 600);
        assert!(!args.clean);
    }
}
