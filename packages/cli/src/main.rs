#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for industrial site analysis.
//!
//! ```text
//! site_analysis seed      [--lng <LNG>] [--lat <LAT>]
//! site_analysis metrics   [--lng <LNG>] [--lat <LAT>] [--pretty]
//! site_analysis report    [--lng <LNG>] [--lat <LAT>] [--name <NAME>]
//! site_analysis serve     [--interactive]
//! site_analysis dashboard [--lng <LNG>] [--lat <LAT>] [--radius <1|3|5>] [--no-latency]
//! ```
//!
//! Running with no subcommand opens the interactive dashboard at the
//! default coordinate (New York City).
//!
//! Uses `indicatif-log-bridge` (via [`site_analysis_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and spinners never fight for the terminal.

mod dashboard;
mod render;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use site_analysis_dashboard::state::RadiusMiles;
use site_analysis_dashboard::{FetchConfig, Report};
use site_analysis_mock::{
    derive_seed, generate_benchmark_bundle, generate_location_bundle, generate_metrics_bundle,
    generate_risk_bundle, generate_site_analysis,
};
use site_analysis_server::ServerConfig;
use site_analysis_site_models::Coordinate;

#[derive(Parser)]
#[command(
    name = "site_analysis",
    about = "Mock industrial site analysis: metrics, benchmarks and risk for any coordinate"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Target coordinate, defaulting to New York City.
#[derive(Args, Clone, Copy)]
struct Site {
    /// Longitude in degrees
    #[arg(long, default_value_t = -74.006, allow_negative_numbers = true)]
    lng: f64,
    /// Latitude in degrees
    #[arg(long, default_value_t = 40.7128, allow_negative_numbers = true)]
    lat: f64,
}

impl Site {
    const fn coordinate(self) -> Coordinate {
        Coordinate::new(self.lng, self.lat)
    }
}

#[derive(Args, Clone, Copy)]
struct JsonOutput {
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the seed derived from a coordinate
    Seed {
        #[command(flatten)]
        site: Site,
    },
    /// Print the map layers as GeoJSON feature collections
    Location {
        #[command(flatten)]
        site: Site,
        #[command(flatten)]
        output: JsonOutput,
    },
    /// Print the nine metric readings
    Metrics {
        #[command(flatten)]
        site: Site,
        #[command(flatten)]
        output: JsonOutput,
    },
    /// Print the benchmark comparison
    Benchmarks {
        #[command(flatten)]
        site: Site,
        #[command(flatten)]
        output: JsonOutput,
    },
    /// Print the risk assessment
    Risk {
        #[command(flatten)]
        site: Site,
        #[command(flatten)]
        output: JsonOutput,
    },
    /// Print every bundle plus the seed
    Analysis {
        #[command(flatten)]
        site: Site,
        #[command(flatten)]
        output: JsonOutput,
    },
    /// Print a plain-text Full Analysis report
    Report {
        #[command(flatten)]
        site: Site,
        /// Location name for the report header
        #[arg(long, default_value = "Selected Location")]
        name: String,
    },
    /// Start the HTTP API server
    Serve {
        /// Prompt for bind address, port and latency before starting
        #[arg(long)]
        interactive: bool,
    },
    /// Open the interactive terminal dashboard
    Dashboard {
        #[command(flatten)]
        site: Site,
        /// Initial radius ring in miles (1, 3 or 5)
        #[arg(long, default_value = "1", value_parser = parse_radius)]
        radius: RadiusMiles,
        /// Skip the simulated fetch latency
        #[arg(long)]
        no_latency: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = site_analysis_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return dashboard::run(
            &multi,
            site_analysis_dashboard::state::DEFAULT_COORDINATE,
            RadiusMiles::default(),
            FetchConfig::embedded(),
        )
        .await;
    };

    match command {
        Commands::Seed { site } => println!("{}", derive_seed(site.coordinate()).value()),
        Commands::Location { site, output } => {
            print_json(&generate_location_bundle(site.coordinate()), output)?;
        }
        Commands::Metrics { site, output } => {
            print_json(&generate_metrics_bundle(site.coordinate()), output)?;
        }
        Commands::Benchmarks { site, output } => {
            print_json(&generate_benchmark_bundle(site.coordinate()), output)?;
        }
        Commands::Risk { site, output } => {
            print_json(&generate_risk_bundle(site.coordinate()), output)?;
        }
        Commands::Analysis { site, output } => {
            print_json(&generate_site_analysis(site.coordinate()), output)?;
        }
        Commands::Report { site, name } => {
            let analysis = generate_site_analysis(site.coordinate());
            print!("{}", Report::from_analysis(&name, &analysis, Utc::now()));
        }
        Commands::Serve { interactive } => {
            let config = ServerConfig::from_env()?;
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(async move {
                    if interactive {
                        site_analysis_server::interactive::run(config).await
                    } else {
                        site_analysis_server::run_server(config).await
                    }
                })
            })
            .await??;
        }
        Commands::Dashboard {
            site,
            radius,
            no_latency,
        } => {
            let fetch = if no_latency {
                FetchConfig::instant()
            } else {
                FetchConfig::embedded()
            };
            dashboard::run(&multi, site.coordinate(), radius, fetch).await?;
        }
    }

    Ok(())
}

fn parse_radius(value: &str) -> Result<RadiusMiles, String> {
    let miles: u32 = value.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
    RadiusMiles::try_from(miles).map_err(|e| e.to_string())
}

fn print_json<T: Serialize>(value: &T, output: JsonOutput) -> Result<(), serde_json::Error> {
    let json = if output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
