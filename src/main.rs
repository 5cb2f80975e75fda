use chrono::FixedOffset;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use sat_visible::report::{render, OutputFormat};
use sat_visible::solver::{solve, SolverConfig, Wgs84};
use sat_visible::tle::TleLoader;

#[derive(Parser)]
#[command(name = "sat-visible")]
#[command(about = "Find satellites passing through a ground antenna's field of view")]
struct Cli {
    /// TLE file, or a directory of .tle/.txt files
    #[arg(short, long)]
    satellites: PathBuf,
    /// JSON (or .yaml) observation config
    #[arg(short, long)]
    config: PathBuf,
    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
    /// Hours east of UTC used when printing times
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    utc_offset: f64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let Some(offset) = utc_offset(cli.utc_offset) else {
        eprintln!("Invalid UTC offset: {} hours", cli.utc_offset);
        return ExitCode::FAILURE;
    };

    let config = match SolverConfig::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let satellites = match TleLoader::new(cli.satellites.clone()).load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading satellites: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let solution = match solve(&satellites, &config, &Wgs84) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match render(&solution, cli.format, offset) {
        Ok(out) => {
            print!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error rendering result: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn utc_offset(hours: f64) -> Option<FixedOffset> {
    if !hours.is_finite() {
        return None;
    }
    FixedOffset::east_opt((hours * 3600.0).round() as i32)
}
