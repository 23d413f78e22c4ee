use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand
};
use env_logger::Builder;
use log::info;

use curvesmoother::configuration::Configuration;
use curvesmoother::smoothing::curvesmoother::CurveSmoother;

const EXTREMUM_SCAN_POINTS: usize = 1000;

#[derive(Parser)]
#[command(about = "Smooth sparse (x, y) samples into dense curves for plotting")]
struct Cli {
    #[clap(subcommand)]
    task: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate the fitted curve on an evenly spaced grid
    Smooth {
        #[command(flatten)]
        target: Target,
        /// Overrides the profile's number of output points
        #[arg(long)]
        resolution: Option<usize>,
    },
    /// Evaluate the fitted curve at the given x values
    Evaluate {
        #[command(flatten)]
        target: Target,
        /// Comma separated x values, all within the sample range
        #[arg(long, value_delimiter = ',', required = true)]
        at: Vec<f64>,
    },
    /// Locate the minimum (or maximum) of the fitted curve
    Extremum {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        maximum: bool,
    },
    /// Compare two series point by point; improvement is (baseline - candidate) / baseline in percent
    Compare {
        /// JSON data file with `series` and `profiles`
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        baseline: String,
        #[arg(long)]
        candidate: String,
        /// Profile applied to both series; plain cubic spline when omitted
        #[arg(long)]
        profile: Option<String>,
        /// Comma separated x values inside both sample ranges
        #[arg(long, value_delimiter = ',', required = true)]
        at: Vec<f64>,
    },
    /// List the series and profiles in a data file
    List {
        #[arg(long)]
        data: PathBuf,
    },
}

#[derive(Debug, clap::Args)]
struct Target {
    /// JSON data file with `series` and `profiles`
    #[arg(long)]
    data: PathBuf,
    /// Name of the sample series
    #[arg(long)]
    series: String,
    /// Name of the smoothing profile; plain cubic spline when omitted
    #[arg(long)]
    profile: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    let mut builder = Builder::from_env(env);
    builder.init();

    let cli = Cli::parse();
    match &cli.task {
        Command::Smooth { target, resolution } => {
            let config = Configuration::from_path(&target.data)?;
            let mut request = config.request(&target.series, target.profile.as_deref())?;
            if let Some(resolution) = resolution {
                request = request.with_resolution(*resolution);
            }
            let curve = CurveSmoother::smooth(&request)?;
            info!("smoothed '{}' into {} points", target.series, curve.len());
            println!("{}", serde_json::to_string_pretty(&curve)?);
        }
        Command::Evaluate { target, at } => {
            let config = Configuration::from_path(&target.data)?;
            let request = config.request(&target.series, target.profile.as_deref())?;
            let points = CurveSmoother::evaluate_at(&request, at)?;
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        Command::Extremum { target, maximum } => {
            let config = Configuration::from_path(&target.data)?;
            let request = config.request(&target.series, target.profile.as_deref())?;
            let point = if *maximum {
                CurveSmoother::locate_maximum(&request, EXTREMUM_SCAN_POINTS)?
            } else {
                CurveSmoother::locate_minimum(&request, EXTREMUM_SCAN_POINTS)?
            };
            info!("'{}' extremum at x = {}", target.series, point.x());
            println!("{}", serde_json::to_string_pretty(&point)?);
        }
        Command::Compare { data, baseline, candidate, profile, at } => {
            let config = Configuration::from_path(data)?;
            let baseline_request = config.request(baseline, profile.as_deref())?;
            let candidate_request = config.request(candidate, profile.as_deref())?;
            let rows = CurveSmoother::compare(&baseline_request, &candidate_request, at)?;
            info!("compared '{}' against '{}' at {} points", candidate, baseline, rows.len());
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Command::List { data } => {
            let config = Configuration::from_path(data)?;
            println!("series:");
            for name in config.series_manager().names() {
                println!("  {}", name);
            }
            println!("profiles:");
            for name in config.profile_manager().names() {
                let method = config.profile(Some(name))?.method();
                let shape = if method.is_shape_preserving() { ", shape preserving" } else { "" };
                println!("  {} ({}{})", name, method.name(), shape);
            }
        }
    }
    Ok(())
}
