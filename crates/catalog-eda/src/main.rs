//! CLI entry point for the catalog analysis pipeline.

use anyhow::{Result, anyhow};
use catalog_eda::reporting::input_stem;
use catalog_eda::{
    AnalysisOutcome, ConsoleReport, DropPolicy, Pipeline, PipelineConfig, ReportGenerator,
};
use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory analysis of a streaming catalog CSV",
    long_about = "Loads a streaming catalog CSV, removes duplicate titles, fills missing values,\n\
                  derives duration and recency features and prints a sectioned report.\n\n\
                  EXAMPLES:\n  \
                  # Analyse netflix_titles.csv in the current directory\n  \
                  catalog-eda\n\n  \
                  # Write the JSON report and the cleaned dataset\n  \
                  catalog-eda -i data/netflix_titles.csv -o results/ -r --export-csv\n\n  \
                  # JSON only, for piping\n  \
                  catalog-eda --json | jq .summary"
)]
struct Args {
    /// Path to the catalog CSV file
    #[arg(short, long, default_value = "netflix_titles.csv")]
    input: PathBuf,

    /// Output directory for reports and exported data
    #[arg(short, long, default_value = "./outputs")]
    output: PathBuf,

    /// Custom name (without extension) for the exported dataset
    #[arg(long)]
    output_name: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print the JSON report to stdout instead of the console report
    ///
    /// Disables all logging.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Write the cleaned dataset as CSV to the output directory
    #[arg(long)]
    export_csv: bool,

    /// Skip columns scheduled for removal that are absent instead of failing
    #[arg(long)]
    lenient_drop: bool,

    /// First release year counted as recent
    #[arg(long, default_value = "2015")]
    recent_year: i64,

    /// Number of countries in the country ranking
    #[arg(long, default_value = "10")]
    top_countries: usize,

    /// Seed for the sampled preview rows
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Load the pipeline configuration from a JSON file
    ///
    /// Analysis flags are ignored; input, output and logging flags still apply.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the report. When `json_output`
/// is true, logging is disabled entirely.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    if let Some(path) = &args.config {
        info!("Loading configuration from: {}", path.display());
        let mut config = PipelineConfig::from_json_file(path)?;
        config.input_path = args.input.clone();
        config.output_dir = args.output.clone();
        if args.output_name.is_some() {
            config.output_name = args.output_name.clone();
        }
        return Ok(config);
    }

    let mut builder = PipelineConfig::builder()
        .input_path(args.input.clone())
        .output_dir(args.output.clone())
        .recent_year_threshold(args.recent_year)
        .top_countries(args.top_countries)
        .sample_seed(args.seed);

    if args.lenient_drop {
        builder = builder.drop_policy(DropPolicy::Lenient);
    }
    if let Some(ref name) = args.output_name {
        builder = builder.output_name(name);
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    let config = build_config(&args)?;
    let pipeline = Pipeline::builder()
        .config(config)
        .on_progress(|update| {
            debug!(
                "[{:>3.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        })
        .build()?;

    match pipeline.run() {
        Ok(outcome) => handle_output(outcome, pipeline.config(), &args),
        Err(e) if e.is_input_not_found() => {
            println!(
                "Error: {} not found. Please ensure the file is in the correct directory.",
                pipeline.config().input_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            Err(anyhow!("Analysis failed: {}", e))
        }
    }
}

/// Handle pipeline output based on CLI flags.
///
/// - Default: print the console report to stdout
/// - `--json`: print the JSON report to stdout only
/// - `--emit-report`: also write the JSON report to the output directory
/// - `--export-csv`: also write the cleaned dataset
fn handle_output(outcome: AnalysisOutcome, config: &PipelineConfig, args: &Args) -> Result<()> {
    let AnalysisOutcome {
        mut result,
        charts,
        mut report,
    } = outcome;

    let generator = ReportGenerator::new(config.output_dir.clone(), config.output_name.clone());
    let stem = input_stem(&config.input_path);

    if args.export_csv {
        let path = generator.export_dataset(&mut result.data, &stem)?;
        report.output_file = Some(path.display().to_string());
    }

    if args.emit_report {
        let report_path = generator.write_report_to_file(&report, &stem)?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let console = ConsoleReport::new(&result, &charts, config)?;
    print!("{}", console);

    Ok(())
}
