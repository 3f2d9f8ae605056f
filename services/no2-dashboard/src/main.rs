//! NO2 dashboard renderer.
//!
//! Turns Sentinel-5P NO2 deliveries from the processing back end into
//! pictures:
//! - `animate`: dated rasters into a looping GIF on one color scale
//! - `map`: one raster as a titled map with a colorbar
//! - `timeseries`: mean / max / moving-average deliveries into a line chart
//! - `assemble`: an existing still directory into a looping GIF

mod commands;
mod config;

use std::path::PathBuf;

use animation::{AnimationRequest, MapRequest};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::DashboardConfig;

#[derive(Parser, Debug)]
#[command(name = "no2-dashboard")]
#[command(about = "Render Sentinel-5P NO2 deliveries into maps, charts and animations")]
struct Args {
    /// Rendering configuration file (YAML)
    #[arg(long, env = "NO2_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render dated rasters into a looping GIF, then delete rasters and stills
    Animate {
        /// Directory holding `<prefix>_<YYYY-MM-DD>Z.<ext>` rasters
        #[arg(long, env = "NO2_FRAME_DIR", default_value = "data/frames")]
        frame_dir: PathBuf,

        /// Directory for intermediate stills
        #[arg(long, env = "NO2_STILL_DIR", default_value = "data/stills")]
        still_dir: PathBuf,

        /// Animation output path
        #[arg(short, long, env = "NO2_OUTPUT", default_value = "data/animation.gif")]
        output: PathBuf,

        /// Frames per second
        #[arg(long, env = "NO2_FPS", default_value = "2", allow_negative_numbers = true)]
        fps: f64,
    },

    /// Render a single raster as a map on its own value range
    Map {
        /// Raster to render
        raster: PathBuf,

        /// PNG output path
        #[arg(short, long, default_value = "data/map.png")]
        output: PathBuf,

        /// Date for the title (default: taken from the raster filename)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Chart mean, max and moving-average deliveries with a 31-sample smoothing
    Timeseries {
        #[arg(long, default_value = "data/time-series-mean.json")]
        mean: PathBuf,

        #[arg(long, default_value = "data/time-series-max.json")]
        max: PathBuf,

        /// Mean of the moving-average cube
        #[arg(long, default_value = "data/time-series-ma.json")]
        moving_average: PathBuf,

        /// PNG output path
        #[arg(short, long, default_value = "data/time-series.png")]
        output: PathBuf,
    },

    /// Animate `YYYY-MM-DD.<ext>` stills already in a directory, then delete them
    Assemble {
        #[arg(long, env = "NO2_STILL_DIR", default_value = "data/stills")]
        still_dir: PathBuf,

        #[arg(short, long, env = "NO2_OUTPUT", default_value = "data/animation.gif")]
        output: PathBuf,

        #[arg(long, env = "NO2_FPS", default_value = "2", allow_negative_numbers = true)]
        fps: f64,
    },
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder().with_max_level(level).with_target(true);
    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let config = DashboardConfig::load(args.config.as_deref())?;
    info!(command = ?args.command, "Starting NO2 dashboard renderer");

    match args.command {
        Command::Animate {
            frame_dir,
            still_dir,
            output,
            fps,
        } => commands::animate(
            &config,
            AnimationRequest {
                frame_dir,
                still_dir,
                output,
                fps,
            },
        ),
        Command::Map { raster, output, date } => commands::map(&config, MapRequest { raster, output, date }),
        Command::Timeseries {
            mean,
            max,
            moving_average,
            output,
        } => commands::timeseries(&config, &mean, &max, &moving_average, &output),
        Command::Assemble {
            still_dir,
            output,
            fps,
        } => commands::assemble(&config, &still_dir, &output, fps),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_animate_defaults() {
        let args = Args::try_parse_from(["no2-dashboard", "animate", "--fps", "5"]).unwrap();
        match args.command {
            Command::Animate { fps, frame_dir, .. } => {
                assert_eq!(fps, 5.0);
                assert_eq!(frame_dir, PathBuf::from("data/frames"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_map_date() {
        let args = Args::try_parse_from([
            "no2-dashboard",
            "map",
            "frame.tif",
            "--date",
            "2019-07-15",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.log_level, "debug");
        match args.command {
            Command::Map { date, raster, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2019, 7, 15));
                assert_eq!(raster, PathBuf::from("frame.tif"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_negative_fps_reaches_validation() {
        let args = Args::try_parse_from(["no2-dashboard", "assemble", "--fps", "-1"]).unwrap();
        assert!(matches!(args.command, Command::Assemble { fps, .. } if fps < 0.0));
    }
}
