//! CLI entry point for the tabular-data validation pipeline.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use table_validation::{
    ErrorPolicy, PipelineConfig, PipelineStage, TypeDefaults, ValidationPipeline,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI-compatible error policy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliErrorPolicy {
    /// Return a non-zero exit code on the first stage failure
    Propagate,
    /// Log stage failures and keep going (legacy behavior)
    Swallow,
}

impl From<CliErrorPolicy> for ErrorPolicy {
    fn from(cli: CliErrorPolicy) -> Self {
        match cli {
            CliErrorPolicy::Propagate => ErrorPolicy::Propagate,
            CliErrorPolicy::Swallow => ErrorPolicy::SwallowAndLog,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Tabular-data validation and cleaning pipeline",
    long_about = "Validates an exported dataset before database loading: reports\n\
                  missing values and duplicate primary keys, removes duplicate rows\n\
                  and drops unwanted columns.\n\n\
                  EXAMPLES:\n  \
                  # Validate a traffic-sensor export keyed on tmc_code\n  \
                  table-validation -i speed_allveh.csv --pk tmc_code --pk observation_count --remove direction\n\n  \
                  # Full diagnostics as JSON\n  \
                  table-validation -i data.csv --pk id --dtypes --summary --json"
)]
struct Args {
    /// Path to the data file to validate (.csv, .json, .xls, .xlsx)
    #[arg(short, long)]
    input: String,

    /// Primary-key column (repeat for a combined key)
    #[arg(long = "pk", required = true)]
    pk_columns: Vec<String>,

    /// Column to drop at the end of the pipeline (repeatable)
    #[arg(long = "remove")]
    columns_to_remove: Vec<String>,

    /// Report the dtype of every column
    #[arg(long)]
    dtypes: bool,

    /// Report count/min/max for numeric columns
    #[arg(long)]
    summary: bool,

    /// Fill missing values with the type defaults after cleaning
    #[arg(long)]
    fill_missing: bool,

    /// Fill value for text columns (with --fill-missing)
    #[arg(long, default_value = "")]
    fill_text: String,

    /// Fill value for integer columns (with --fill-missing)
    #[arg(long, default_value_t = -9999)]
    fill_integer: i64,

    /// Fill value for decimal columns (with --fill-missing)
    #[arg(long, default_value_t = -9999.0)]
    fill_decimal: f64,

    /// What to do when a stage fails
    #[arg(long = "on-error", value_enum, default_value_t = CliErrorPolicy::Propagate)]
    error_policy: CliErrorPolicy,

    /// Print the exploration report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Suppress per-column diagnostic logging in the cleaning stages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = PipelineConfig::builder()
        .df_path(&args.input)
        .pk_columns(args.pk_columns.clone())
        .columns_to_remove(args.columns_to_remove.clone())
        .type_defaults(TypeDefaults {
            text: args.fill_text.clone(),
            integer: args.fill_integer,
            decimal: args.fill_decimal,
        })
        .error_policy(args.error_policy.into())
        .include_dtypes(args.dtypes)
        .include_summary(args.summary)
        .verbose(!args.quiet)
        .build()
        .context("Invalid pipeline configuration")?;

    let mut pipeline = ValidationPipeline::new(config);

    // run() applies the configured error policy itself: propagate returns
    // the typed error here, swallow logs it and leaves the stage at Failed.
    pipeline.run().context("Pipeline failed")?;

    if args.json {
        if let Some(report) = pipeline.exploration_report() {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }

    if args.fill_missing && pipeline.stage() == PipelineStage::ColumnsDropped {
        pipeline.fill_missing().context("Missing-value fill failed")?;
    }

    if let Some(df) = pipeline.dataframe() {
        info!(
            "Done: {} rows and {} columns after cleaning (stage: {})",
            df.height(),
            df.width(),
            pipeline.stage()
        );
    }

    Ok(())
}
