//! WCPS command line client.
//!
//! Builds one of the canned analyses, then either prints the query text
//! (`--dry-run`), saves the raw payload (`--output`) or prints the decoded
//! result.

mod output;
mod recipes;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use wcps_client::{ClientConfig, Datacube, QueryResponse};
use wcps_query::EncodingFormat;

use recipes::Recipe;

#[derive(Parser, Debug)]
#[command(name = "wcps")]
#[command(about = "Run WCPS analyses against a rasdaman endpoint")]
struct Args {
    /// WCPS endpoint (defaults to the rasdaman demo server)
    #[arg(long, env = "WCPS_ENDPOINT")]
    endpoint: Option<String>,

    /// Coverage to query
    #[arg(long, env = "WCPS_COVERAGE", default_value = "AvgLandTemp")]
    coverage: String,

    /// Result encoding (CSV, PNG, JPEG), overriding the analysis default
    #[arg(long)]
    format: Option<String>,

    /// Log every composed query
    #[arg(long)]
    debug: bool,

    /// Print the query text without sending it
    #[arg(long)]
    dry_run: bool,

    /// Save the raw response payload to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    analysis: Analysis,
}

#[derive(Subcommand, Debug)]
enum Analysis {
    /// Count months of 2014 above a temperature at Bremen
    Threshold {
        #[arg(long, default_value = "15")]
        threshold: f64,
    },
    /// Mean temperature for summer 2014
    SummerMean,
    /// Values at a location over a date range
    TimeSeries {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        long: f64,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Slice at a location and date
    Point {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        long: f64,
        #[arg(long)]
        date: String,
    },
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_recipe(datacube: &Datacube, args: &Args) -> Result<Recipe> {
    let query = datacube.query_builder(args.debug);
    let recipe = match &args.analysis {
        Analysis::Threshold { threshold } => recipes::temperature_above_threshold(query, *threshold),
        Analysis::SummerMean => recipes::mean_summer_temperature(query),
        Analysis::TimeSeries {
            lat,
            long,
            start,
            end,
        } => recipes::time_series(query, *lat, *long, (start.as_str(), end.as_str())),
        Analysis::Point { lat, long, date } => {
            recipes::spatial_point(query, *lat, *long, date.as_str())
        }
    };
    recipe.context("Invalid analysis parameters")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    let mut config = ClientConfig::from_env();
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }

    let datacube =
        Datacube::connect(&config, args.coverage.clone()).context("Failed to create client")?;
    let mut recipe = build_recipe(&datacube, &args)?;

    if let Some(format) = &args.format {
        let format: EncodingFormat = format.parse().context("Invalid --format")?;
        recipe.encoding = Some(format);
    }

    if args.dry_run {
        println!("{}", recipe.query.finalize(recipe.encoding));
        return Ok(());
    }

    info!(
        endpoint = %datacube.endpoint(),
        coverage = %datacube.coverage_id(),
        "Running WCPS analysis"
    );

    if let Some(path) = &args.output {
        match datacube.execute_raw(&recipe.query, recipe.encoding).await {
            QueryResponse::Success { payload, status } => {
                debug!(status, bytes = payload.len(), "Saving raw payload");
                output::write_payload(path, &payload).await?;
                println!("Wrote {} bytes to {}", payload.len(), path.display());
            }
            QueryResponse::Failure(failure) => bail!(output::describe_failure(&failure)),
        }
        return Ok(());
    }

    let result = datacube
        .execute(&recipe.query, recipe.encoding)
        .await
        .context("Failed to decode result")?;
    if result.is_failed() {
        bail!(output::render(&result)?);
    }
    println!("{}", output::render(&result)?);

    Ok(())
}
