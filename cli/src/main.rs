//! leasedeck CLI - landlord update deck generator

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use leasedeck::narrative::{NarrativeSource, StaticNarrative, UnavailableNarrative};
use leasedeck::{
    extract_facts, Capabilities, HttpNarrativeSource, LayoutOptions, PipelineOptions,
    RasterOptions, ReportPipeline, ReportRequest, ReportingPeriod,
};

#[derive(Parser)]
#[command(name = "leasedeck")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn offering memorandums into landlord update decks", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Property address
    #[arg(value_name = "ADDRESS")]
    address: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PPTX deck from an offering PDF
    #[command(alias = "gen")]
    Generate {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Property address
        #[arg(short, long)]
        address: String,

        /// Output file or directory
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        narrative: NarrativeArgs,

        /// First day of the reporting period (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        period_start: Option<NaiveDate>,

        /// Last day of the reporting period (YYYY-MM-DD, defaults to start + 13 days)
        #[arg(long, value_parser = parse_date)]
        period_end: Option<NaiveDate>,

        /// Pixels per PDF point for page rendering
        #[arg(long, default_value = "2.0")]
        scale: f64,

        /// Render pages one after the other
        #[arg(long)]
        sequential: bool,
    },

    /// Print the property facts extracted from an offering PDF
    Facts {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Default)]
struct NarrativeArgs {
    /// Market narrative service URL
    #[arg(long, env = "LEASEDECK_NARRATIVE_URL")]
    narrative_url: Option<String>,

    /// Market narrative request timeout in seconds
    #[arg(long, env = "LEASEDECK_NARRATIVE_TIMEOUT", default_value = "30")]
    narrative_timeout: u64,

    /// Read the market narrative from a file instead of the service
    #[arg(long, value_name = "FILE", conflicts_with = "narrative_url")]
    narrative_file: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate {
            input,
            address,
            output,
            narrative,
            period_start,
            period_end,
            scale,
            sequential,
        }) => cmd_generate(
            &input,
            &address,
            output.as_deref(),
            &narrative,
            reporting_period(period_start, period_end),
            scale,
            sequential,
        ),
        Some(Commands::Facts {
            input,
            output,
            compact,
        }) => cmd_facts(&input, output.as_deref(), compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.input, cli.address) {
            // Default behavior: generate if input and address are provided
            (Some(input), Some(address)) => cmd_generate(
                &input,
                &address,
                None,
                &NarrativeArgs::from_env(),
                ReportingPeriod::default(),
                RasterOptions::default().scale,
                false,
            ),
            _ => {
                println!("{}", "Usage: leasedeck <FILE> <ADDRESS>".yellow());
                println!("       leasedeck --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

impl NarrativeArgs {
    /// Service settings from the environment only.
    fn from_env() -> Self {
        Self {
            narrative_url: std::env::var("LEASEDECK_NARRATIVE_URL").ok(),
            narrative_timeout: std::env::var("LEASEDECK_NARRATIVE_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            narrative_file: None,
        }
    }

    fn source(&self) -> Result<Arc<dyn NarrativeSource>, Box<dyn std::error::Error>> {
        if let Some(path) = &self.narrative_file {
            let text = fs::read_to_string(path)?;
            return Ok(Arc::new(StaticNarrative::new(text.trim_end())));
        }
        match &self.narrative_url {
            Some(url) => Ok(Arc::new(HttpNarrativeSource::with_timeout(
                url.as_str(),
                Duration::from_secs(self.narrative_timeout),
            )?)),
            None => {
                log::info!("No narrative service configured, using fallback text");
                Ok(Arc::new(UnavailableNarrative))
            }
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}

fn reporting_period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ReportingPeriod {
    let default = ReportingPeriod::default();
    match (start, end) {
        (None, None) => default,
        (Some(start), None) => {
            let end = start.checked_add_days(Days::new(13)).unwrap_or(start);
            ReportingPeriod::new(start, end)
        }
        (None, Some(end)) => {
            let start = end.checked_sub_days(Days::new(13)).unwrap_or(end);
            ReportingPeriod::new(start, end)
        }
        (Some(start), Some(end)) => ReportingPeriod::new(start, end),
    }
}

/// Resolve the output path: a directory gets the default file name appended.
fn output_path(output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

fn cmd_generate(
    input: &Path,
    address: &str,
    output: Option<&Path>,
    narrative: &NarrativeArgs,
    period: ReportingPeriod,
    scale: f64,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading PDF...");
    let request = ReportRequest::from_path(input, address)?;

    let mut raster = RasterOptions::new().with_scale(scale);
    if sequential {
        raster = raster.sequential();
    }
    let options = PipelineOptions::new()
        .with_raster_options(raster)
        .with_layout_options(LayoutOptions::new().with_period(period));

    let pipeline = ReportPipeline::new(Capabilities::with_defaults())
        .with_options(options)
        .with_narrative(narrative.source()?);

    pb.set_message("Generating deck...");
    let artifact = pipeline.run(&request)?;

    let path = output_path(output, &artifact.file_name);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    artifact.save(&path)?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Property".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Name".bold(), artifact.facts.name);
    println!("{}: {}", "Location".bold(), artifact.facts.location_label);
    println!("{}: {}", "Size".bold(), artifact.facts.size_label);
    println!("{}: {}", "Available".bold(), artifact.facts.available_space_label);
    println!("{}: {}", "Rent".bold(), artifact.facts.rent_label);
    println!();
    println!(
        "{} {} ({} slides, {} bytes)",
        "Saved to".green(),
        path.display(),
        artifact.slide_count,
        artifact.len()
    );

    Ok(())
}

fn cmd_facts(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let facts = extract_facts(&data)?;

    let json = if compact {
        serde_json::to_string(&facts)?
    } else {
        serde_json::to_string_pretty(&facts)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "leasedeck".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Landlord update deck generator");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/leasedeck".dimmed());
    println!("License: MIT");
}
